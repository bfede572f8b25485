//! Landing page rendering

use crate::content::{FAQS, FEATURES, FOOTER_COLUMNS, HERO, PLANS, STATS, TAGLINE, TESTIMONIALS, TRUSTED_COMPANIES};
use crate::{base_html, brand, theme_toggle, AppState};
use chrono::{Datelike, Utc};
use paypilot_config::Theme;
use paypilot_utils::escape_html;

pub async fn page_home(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let (theme, signed_in) = match state.sessions.lookup(&headers).await {
        Some(visitor) => {
            let session = visitor.session.lock().await;
            (session.context.theme(), session.context.is_authenticated())
        }
        None => (state.config.appearance.default_theme, false),
    };

    let entry = if signed_in { "/dashboard" } else { "/login" };

    let content = [
        navbar(theme, signed_in, entry),
        hero(entry),
        trusted_companies(),
        features(),
        stats(),
        pricing(entry),
        testimonials(),
        faq(),
        footer(),
    ]
    .concat();

    axum::response::Html(base_html("Payments analytics", theme, &content))
}

fn navbar(theme: Theme, signed_in: bool, entry: &str) -> String {
    let account = if signed_in {
        format!("<a href='{}' class='rounded-lg bg-indigo-600 px-5 py-2 text-sm font-medium text-white hover:bg-indigo-500'>Dashboard</a>", entry)
    } else {
        format!(
            "<a href='/login' class='text-sm text-gray-600 hover:text-gray-900 dark:text-gray-400 dark:hover:text-white'>Sign in</a>\
             <a href='{}' class='rounded-lg bg-indigo-600 px-5 py-2 text-sm font-medium text-white hover:bg-indigo-500'>{}</a>",
            entry, HERO.primary_cta
        )
    };
    format!(
        r#"<nav class='sticky top-0 z-40 border-b border-gray-200 bg-white/80 backdrop-blur dark:border-gray-800 dark:bg-slate-950/80'>
    <div class='mx-auto flex max-w-7xl items-center justify-between px-6 py-4'>
        <a href='/' class='text-2xl font-semibold tracking-wide'>{}</a>
        <div class='hidden md:flex gap-8 text-sm text-gray-600 dark:text-gray-400'>
            <a href='#features' class='hover:text-gray-900 dark:hover:text-white'>Features</a>
            <a href='#pricing' class='hover:text-gray-900 dark:hover:text-white'>Pricing</a>
            <a href='#faq' class='hover:text-gray-900 dark:hover:text-white'>FAQ</a>
        </div>
        <div class='flex items-center gap-4'>{}{}</div>
    </div>
</nav>"#,
        brand(),
        theme_toggle(theme),
        account
    )
}

fn hero(entry: &str) -> String {
    format!(
        r#"<section class='relative overflow-hidden py-24'>
    <div class='mx-auto max-w-5xl px-6 text-center'>
        <span class='inline-block rounded-full border border-indigo-500/30 bg-indigo-500/10 px-4 py-1 text-sm text-indigo-500'>{}</span>
        <h1 class='mt-8 text-4xl md:text-6xl font-bold tracking-tight'>{}</h1>
        <p class='mx-auto mt-6 max-w-2xl text-lg text-gray-600 dark:text-gray-400'>{}</p>
        <div class='mt-10 flex justify-center gap-4'>
            <a href='{}' class='rounded-lg bg-indigo-600 px-6 py-3 font-medium text-white hover:bg-indigo-500'>{}</a>
            <a href='#features' class='rounded-lg border border-gray-300 px-6 py-3 font-medium hover:bg-gray-100 dark:border-gray-700 dark:hover:bg-gray-800'>{}</a>
        </div>
    </div>
</section>"#,
        HERO.badge, HERO.title, HERO.subtitle, entry, HERO.primary_cta, HERO.secondary_cta
    )
}

fn trusted_companies() -> String {
    let names: String = TRUSTED_COMPANIES
        .iter()
        .map(|name| format!("<span class='text-lg font-semibold text-gray-500'>{}</span>", name))
        .collect();
    format!(
        r#"<section class='border-y border-gray-200 bg-gray-50 py-16 dark:border-gray-800/50 dark:bg-gray-900/30'>
    <p class='mb-10 text-center text-sm font-medium uppercase tracking-widest text-gray-500'>Trusted by teams at</p>
    <div class='flex flex-wrap items-center justify-center gap-x-12 gap-y-6'>{}</div>
</section>"#,
        names
    )
}

fn features() -> String {
    let cards: String = FEATURES
        .iter()
        .map(|f| {
            format!(
                r#"<div class='rounded-2xl border border-gray-200 bg-white p-8 dark:border-gray-800 dark:bg-gray-900/40'>
    <div class='mb-4 text-3xl'>{}</div>
    <h3 class='text-xl font-semibold'>{}</h3>
    <p class='mt-3 text-sm leading-relaxed text-gray-600 dark:text-gray-400'>{}</p>
</div>"#,
                f.icon, f.title, f.description
            )
        })
        .collect();
    format!(
        r#"<section id='features' class='py-24'>
    <div class='mx-auto max-w-7xl px-6'>
        <h2 class='text-3xl md:text-4xl font-bold'>Powerful Financial Infrastructure</h2>
        <p class='mt-4 text-gray-600 dark:text-gray-400'>Everything you need to accept payments, manage subscriptions, and scale globally.</p>
        <div class='mt-16 grid gap-8 md:grid-cols-3'>{}</div>
    </div>
</section>"#,
        cards
    )
}

fn stats() -> String {
    let items: String = STATS
        .iter()
        .map(|(value, label)| {
            format!(
                "<div class='text-center'><p class='text-3xl md:text-4xl font-bold'>{}</p><p class='mt-2 text-sm text-gray-600 dark:text-gray-400'>{}</p></div>",
                value, label
            )
        })
        .collect();
    format!(
        "<section class='py-16'><div class='mx-auto grid max-w-5xl grid-cols-2 gap-8 px-6 md:grid-cols-4'>{}</div></section>",
        items
    )
}

fn pricing(entry: &str) -> String {
    let cards: String = PLANS
        .iter()
        .map(|plan| {
            let features: String = plan
                .features
                .iter()
                .map(|f| format!("<li class='flex gap-2'><span class='text-indigo-500'>✓</span>{}</li>", f))
                .collect();
            let (border, badge, button) = if plan.highlighted {
                (
                    "border-indigo-500 ring-1 ring-indigo-500",
                    "<span class='absolute -top-3 left-1/2 -translate-x-1/2 rounded-full bg-indigo-600 px-3 py-1 text-xs font-medium text-white'>Most popular</span>",
                    "bg-indigo-600 text-white hover:bg-indigo-500",
                )
            } else {
                (
                    "border-gray-200 dark:border-gray-800",
                    "",
                    "border border-gray-300 hover:bg-gray-100 dark:border-gray-700 dark:hover:bg-gray-800",
                )
            };
            format!(
                r#"<div class='relative rounded-2xl border {} bg-white p-8 dark:bg-gray-900/40'>
    {}
    <h3 class='text-lg font-semibold'>{}</h3>
    <p class='mt-2 text-sm text-gray-600 dark:text-gray-400'>{}</p>
    <p class='mt-6'><span class='text-4xl font-bold'>{}</span><span class='text-gray-500'>{}</span></p>
    <ul class='mt-8 space-y-3 text-sm'>{}</ul>
    <a href='{}' class='mt-8 block rounded-lg px-4 py-2 text-center font-medium {}'>{}</a>
</div>"#,
                border, badge, plan.name, plan.description, plan.price, plan.period, features, entry, button, plan.cta
            )
        })
        .collect();
    format!(
        r#"<section id='pricing' class='py-24'>
    <div class='mx-auto max-w-7xl px-6'>
        <div class='mb-16 text-center'>
            <h2 class='text-3xl md:text-4xl font-bold'>Simple, transparent pricing</h2>
            <p class='mx-auto mt-4 max-w-2xl text-gray-600 dark:text-gray-400'>Start free. Scale as you grow. No hidden fees.</p>
        </div>
        <div class='grid gap-8 md:grid-cols-3'>{}</div>
    </div>
</section>"#,
        cards
    )
}

fn testimonials() -> String {
    let cards: String = TESTIMONIALS
        .iter()
        .map(|t| {
            format!(
                r#"<div class='rounded-2xl border border-gray-200 bg-white p-8 dark:border-gray-800 dark:bg-gray-900/40'>
    <div class='mb-6 text-amber-400'>★★★★★</div>
    <blockquote class='text-sm leading-relaxed text-gray-600 dark:text-gray-300'>&ldquo;{}&rdquo;</blockquote>
    <div class='mt-6 flex items-center gap-4'>
        <div class='flex h-12 w-12 items-center justify-center rounded-full bg-indigo-100 font-semibold text-indigo-600 dark:bg-indigo-500/20 dark:text-indigo-300'>{}</div>
        <div><p class='font-medium'>{}</p><p class='text-sm text-gray-500'>{}, {}</p></div>
    </div>
</div>"#,
                escape_html(t.quote), t.avatar, t.author, t.role, t.company
            )
        })
        .collect();
    format!(
        r#"<section class='py-24'>
    <div class='mx-auto max-w-7xl px-6'>
        <div class='mb-16 text-center'>
            <h2 class='text-3xl md:text-4xl font-bold'>Loved by finance teams</h2>
            <p class='mx-auto mt-4 max-w-2xl text-gray-600 dark:text-gray-400'>See what teams building the future of payments are saying.</p>
        </div>
        <div class='grid gap-8 md:grid-cols-3'>{}</div>
    </div>
</section>"#,
        cards
    )
}

fn faq() -> String {
    // first entry starts expanded
    let items: String = FAQS
        .iter()
        .enumerate()
        .map(|(i, (question, answer))| {
            format!(
                r#"<details class='group rounded-xl border border-gray-200 bg-white dark:border-gray-800 dark:bg-gray-900/40'{}>
    <summary class='flex cursor-pointer items-center justify-between px-6 py-5 font-medium'>{}<span class='transition-transform group-open:rotate-180'>⌄</span></summary>
    <p class='px-6 pb-5 text-sm leading-relaxed text-gray-600 dark:text-gray-300'>{}</p>
</details>"#,
                if i == 0 { " open" } else { "" },
                question,
                answer
            )
        })
        .collect();
    format!(
        r#"<section id='faq' class='py-24'>
    <div class='mx-auto max-w-3xl px-6'>
        <div class='mb-16 text-center'>
            <h2 class='text-3xl md:text-4xl font-bold'>Frequently asked questions</h2>
            <p class='mt-4 text-gray-600 dark:text-gray-400'>Everything you need to know about PayPilot.</p>
        </div>
        <div class='space-y-3'>{}</div>
    </div>
</section>"#,
        items
    )
}

fn footer() -> String {
    let columns: String = FOOTER_COLUMNS
        .iter()
        .map(|(heading, links)| {
            let items: String = links
                .iter()
                .map(|l| format!("<li><a href='#' class='hover:text-gray-900 dark:hover:text-white'>{}</a></li>", l))
                .collect();
            format!(
                "<div><h3 class='text-sm font-semibold'>{}</h3><ul class='mt-4 space-y-2 text-sm text-gray-600 dark:text-gray-400'>{}</ul></div>",
                heading, items
            )
        })
        .collect();
    format!(
        r#"<footer class='border-t border-gray-200 py-16 dark:border-gray-800'>
    <div class='mx-auto max-w-7xl px-6'>
        <div class='grid grid-cols-2 gap-10 md:grid-cols-5'>
            <div class='col-span-2 md:col-span-1'>
                <h2 class='text-2xl font-semibold tracking-wide'>{}</h2>
                <p class='mt-4 max-w-xs text-sm text-gray-600 dark:text-gray-400'>{}</p>
            </div>
            {}
        </div>
        <div class='mt-12 flex flex-col items-center justify-between gap-4 border-t border-gray-200 pt-6 text-sm text-gray-500 sm:flex-row dark:border-gray-800'>
            <p>&copy; {} PayPilot. All rights reserved.</p>
            <p>{}.</p>
        </div>
    </div>
</footer>"#,
        brand(),
        TAGLINE,
        columns,
        Utc::now().year(),
        HERO.badge
    )
}
