//! Static marketing content for the landing page

pub struct Hero {
    pub badge: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub primary_cta: &'static str,
    pub secondary_cta: &'static str,
}

pub const HERO: Hero = Hero {
    badge: "Built for modern finance teams",
    title: "Real-time visibility for every financial decision",
    subtitle: "Track growth, monitor transactions, and optimize performance from a single premium dashboard designed for high-growth fintech products.",
    primary_cta: "Get Started",
    secondary_cta: "View Demo",
};

pub const TRUSTED_COMPANIES: [&str; 8] = [
    "Stripe", "Razorpay", "Vercel", "Notion", "Linear", "Figma", "Slack", "Discord",
];

pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const FEATURES: [Feature; 3] = [
    Feature {
        title: "Smart Payment Gateway",
        description: "Lightning fast transactions with 99.9% uptime and seamless global support.",
        icon: "💳",
    },
    Feature {
        title: "Subscription Management",
        description: "Automated billing, invoicing, retry logic, and flexible pricing models.",
        icon: "🔁",
    },
    Feature {
        title: "Fraud Detection",
        description: "AI-powered monitoring and risk analysis to protect every transaction.",
        icon: "🛡️",
    },
];

/// (value, label)
pub const STATS: [(&str, &str); 4] = [
    ("99.9%", "Uptime SLA"),
    ("50M+", "Transactions processed"),
    ("12K+", "Active businesses"),
    ("150+", "Countries supported"),
];

pub struct Plan {
    pub name: &'static str,
    pub price: &'static str,
    /// Empty for custom pricing
    pub period: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub cta: &'static str,
    pub highlighted: bool,
}

pub const PLANS: [Plan; 3] = [
    Plan {
        name: "Starter",
        price: "$29",
        period: "/month",
        description: "For small teams getting started",
        features: &[
            "Up to 1,000 transactions/mo",
            "Basic analytics",
            "Email support",
            "Stripe & Razorpay",
        ],
        cta: "Start free trial",
        highlighted: false,
    },
    Plan {
        name: "Growth",
        price: "$99",
        period: "/month",
        description: "For scaling businesses",
        features: &[
            "Up to 10,000 transactions/mo",
            "Advanced analytics",
            "Priority support",
            "Custom webhooks",
            "Fraud detection",
            "Subscription management",
        ],
        cta: "Start free trial",
        highlighted: true,
    },
    Plan {
        name: "Enterprise",
        price: "Custom",
        period: "",
        description: "For large-scale operations",
        features: &[
            "Unlimited transactions",
            "Dedicated account manager",
            "SLA guarantee",
            "Custom integrations",
            "On-premise deployment",
            "24/7 phone support",
        ],
        cta: "Contact sales",
        highlighted: false,
    },
];

pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub role: &'static str,
    pub company: &'static str,
    pub avatar: &'static str,
}

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        quote: "PayPilot cut our payment integration time from 3 weeks to 2 days. The API is clean, docs are excellent, and support actually responds.",
        author: "Sarah Chen",
        role: "CTO",
        company: "Flowbase",
        avatar: "SC",
    },
    Testimonial {
        quote: "We switched from manual billing to PayPilot's subscription management. Revenue recovery from failed payments went up 40% in the first month.",
        author: "Marcus Johnson",
        role: "Founder",
        company: "SaaSify",
        avatar: "MJ",
    },
    Testimonial {
        quote: "The fraud detection caught a suspicious pattern before we lost money. For a fintech startup, that peace of mind is invaluable.",
        author: "Priya Sharma",
        role: "Head of Finance",
        company: "Edify",
        avatar: "PS",
    },
];

/// (question, answer)
pub const FAQS: [(&str, &str); 5] = [
    (
        "How quickly can I integrate PayPilot?",
        "Most teams complete integration within 1-2 days. Our REST API and SDKs are designed for quick setup. We also offer migration support for teams switching from Stripe, Razorpay, or other providers.",
    ),
    (
        "What payment methods do you support?",
        "We support cards (Visa, Mastercard, Amex), UPI, net banking, wallets, and international payment methods across 150+ countries. New methods are added based on demand.",
    ),
    (
        "How does fraud detection work?",
        "Our AI models analyze transaction patterns, device fingerprints, and behavioral signals in real-time. Suspicious transactions are flagged for review or blocked automatically based on your risk tolerance.",
    ),
    (
        "Can I use PayPilot with my existing stack?",
        "Yes. PayPilot works with any frontend or backend. We provide webhooks, REST APIs, and SDKs for Node, Python, PHP, and more. No vendor lock-in.",
    ),
    (
        "What happens if a subscription payment fails?",
        "Our smart retry logic automatically retries failed payments with configurable schedules. You can set retry rules, send dunning emails, and pause or cancel subscriptions based on your business rules.",
    ),
];

/// (heading, links)
pub const FOOTER_COLUMNS: [(&str, &[&str]); 4] = [
    ("Product", &["Features", "Pricing", "Integrations", "Changelog", "Status"]),
    ("Resources", &["Documentation", "API Reference", "Guides", "Blog", "Support"]),
    ("Company", &["About", "Careers", "Contact", "Partners", "Press"]),
    ("Legal", &["Privacy", "Terms", "Security", "Cookies"]),
];

pub const TAGLINE: &str = "Modern payment infrastructure for startups and scale-ups.";
