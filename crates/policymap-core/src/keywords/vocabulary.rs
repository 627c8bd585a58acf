//! Default controlled vocabulary for AI and IT policy corpora

/// Lemmatized keywords matched against chunk tokens
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "academic",
    "acceptable",
    "accessibility",
    "activity",
    "adapt",
    "administrative",
    "adobe",
    "aggregate",
    "applicable",
    "approval",
    "artificialintelligence",
    "assignment",
    "assistance",
    "attendees",
    "authorize",
    "barrier",
    "capability",
    "chat",
    "chatbots",
    "chatgpt",
    "class",
    "classification",
    "classroom",
    "cloud",
    "collaboration",
    "communicate",
    "companion",
    "compliance",
    "computer",
    "consultation",
    "context",
    "control",
    "create",
    "custody",
    "cybersecurity",
    "data",
    "device",
    "digital",
    "draft",
    "electronic",
    "employee",
    "encryption",
    "ethic",
    "evaluate",
    "evaluation",
    "event",
    "excellence",
    "expectation",
    "explore",
    "facility",
    "faculty",
    "final",
    "gai",
    "genai",
    "generative",
    "guidance",
    "guide",
    "guideline",
    "host",
    "human",
    "idea",
    "identity",
    "install",
    "instructors",
    "integrity",
    "intellectual",
    "invite",
    "it",
    "knowledge",
    "language",
    "languagemodels",
    "law",
    "learn",
    "legitimate",
    "level",
    "library",
    "loss",
    "measure",
    "mobile",
    "model",
    "objective",
    "office",
    "output",
    "owned",
    "permitted",
    "personal",
    "phone",
    "physical",
    "pii",
    "platform",
    "policy",
    "practice",
    "prints",
    "privacy",
    "product",
    "program",
    "prompt",
    "protect",
    "protection",
    "provost",
    "public",
    "quality",
    "quiz",
    "record",
    "regulate",
    "requirement",
    "research",
    "researcher",
    "resource",
    "restrict",
    "review",
    "risk",
    "room",
    "scan",
    "school",
    "secure",
    "security",
    "sensitivity",
    "session",
    "skill",
    "software",
    "step",
    "strongly",
    "student",
    "style",
    "success",
    "system",
    "teach",
    "technology",
    "telehealth",
    "tls",
    "tool",
    "transmit",
    "unacceptable",
    "unauthorized",
    "university",
    "verify",
    "violation",
    "virtual",
    "workshop",
    "write",
    "zoom",
];
