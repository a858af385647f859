//! # Built-in Knowledge Base Table
//!
//! File: cli/src/bot/builtin.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The help rules for the research platform, plus the default fallback prompts
//! and example queries. Used whenever no `responder.knowledge_base` file is
//! configured.
//!
//! Row order is priority order: the matcher walks `RULES` top to bottom and the
//! first row with a trigger contained in the input wins. Keep broad triggers
//! (like `"ai"` or `"like"`) below the rules they would otherwise shadow.
//!

/// A single static row of the built-in table. Converted into an owned
/// [`super::knowledge::Rule`] when the knowledge base is built.
pub struct StaticRule {
    pub triggers: &'static [&'static str],
    pub answer: &'static str,
    /// `(label, target)` pairs.
    pub links: &'static [(&'static str, &'static str)],
}

pub const RULES: &[StaticRule] = &[
    // --- Paper management ---
    StaticRule {
        triggers: &["upload", "submit", "add paper", "publish paper"],
        answer: "📄 To upload a paper:\n1. Click 'Papers' in the navigation menu\n2. Click 'Upload Paper'\n3. Fill in the title, abstract, authors, and upload PDF\n4. Submit for moderator approval\n\nNote: Papers need approval before being published.",
        links: &[("Upload Paper", "/papers/upload/")],
    },
    StaticRule {
        triggers: &["bookmark", "save paper", "favorite"],
        answer: "🔖 Your bookmarks are saved papers you want to read later!\n\nTo bookmark a paper:\n• Click the bookmark icon on any paper\n• View all bookmarks from your profile menu\n• Organize bookmarks into folders",
        links: &[("View Bookmarks", "/papers/bookmarks/")],
    },
    StaticRule {
        triggers: &["edit paper", "modify paper", "update paper"],
        answer: "✏️ To edit your paper:\n1. Go to 'My Papers' from your profile menu\n2. Click the edit icon on your paper\n3. Make your changes\n4. Save\n\nNote: Only your own papers can be edited.",
        links: &[("My Papers", "/papers/my-papers/")],
    },
    StaticRule {
        triggers: &["delete paper", "remove paper"],
        answer: "🗑️ To delete a paper:\n1. Go to 'My Papers'\n2. Click the delete icon\n3. Confirm deletion\n\nWarning: This action cannot be undone!",
        links: &[("My Papers", "/papers/my-papers/")],
    },
    StaticRule {
        triggers: &["reading list", "paper list", "collection"],
        answer: "📚 Reading Lists help you organize papers!\n\nYou can:\n• Create custom reading lists\n• Add papers to lists\n• Share lists with others\n• Make lists public or private",
        links: &[("My Reading Lists", "/papers/reading-lists/")],
    },
    // --- Groups & collaboration ---
    StaticRule {
        triggers: &["group", "join group", "create group", "research group"],
        answer: "👥 Research Groups let you collaborate!\n\nTo join a group:\n1. Go to 'Groups' in the menu\n2. Browse available groups\n3. Click 'Join Group'\n\nTo create a group:\n1. Go to 'Groups'\n2. Click 'Create Group'\n3. Fill in details and invite members",
        links: &[
            ("Browse Groups", "/groups/"),
            ("My Groups", "/groups/my-groups/"),
        ],
    },
    StaticRule {
        triggers: &["collaboration", "collaborate", "work together"],
        answer: "🤝 Collaboration features:\n\n• Join research groups\n• Create research projects\n• Share reading lists\n• Message other researchers\n• Co-author papers\n\nView your collaboration network in your dashboard!",
        links: &[("Collaboration Network", "/analytics/network/")],
    },
    StaticRule {
        triggers: &["message", "chat", "dm", "direct message"],
        answer: "💬 To message other researchers:\n1. Click your profile menu\n2. Select 'Messages'\n3. Start a new conversation\n4. Select a user and send your message",
        links: &[("Messages", "/messaging/conversations/")],
    },
    // --- Navigation & features ---
    StaticRule {
        triggers: &["dashboard", "home", "main page"],
        answer: "📊 Your Dashboard shows:\n• Recent papers you've read\n• Your bookmarks\n• Reading statistics\n• Recommendations\n• Activity feed",
        links: &[("Go to Dashboard", "/accounts/dashboard/")],
    },
    StaticRule {
        triggers: &["profile", "account", "settings"],
        answer: "👤 Your Profile includes:\n• Personal information\n• Research interests\n• Uploaded papers\n• Statistics\n• ORCID integration\n\nEdit your profile from the profile menu!",
        links: &[("View Profile", "/accounts/profile/")],
    },
    StaticRule {
        triggers: &["notification", "alert", "updates"],
        answer: "🔔 Notifications keep you updated!\n\nYou'll receive notifications for:\n• Comments on your papers\n• New ratings\n• Paper approvals\n• New followers\n• Group invitations\n• Messages",
        links: &[("View Notifications", "/messaging/notifications/")],
    },
    StaticRule {
        triggers: &["search", "find paper", "look for"],
        answer: "🔍 To search for papers:\n1. Click 'Search' in the menu\n2. Enter keywords, authors, or topics\n3. Use filters for categories, year, citations\n4. Enable boolean search for advanced queries (AND, OR, NOT)",
        links: &[("Search Papers", "/search/")],
    },
    StaticRule {
        triggers: &["category", "categories", "topics"],
        answer: "🏷️ Categories help organize papers by topic!\n\n• Browse papers by category\n• Request new categories\n• Filter search by category\n• See trending topics",
        links: &[("Browse Categories", "/papers/categories/")],
    },
    // --- Research assistant ---
    StaticRule {
        triggers: &["yggdrasil", "ai", "chatbot", "research assistant"],
        answer: "🌳 Yggdrasil is our AI Research Assistant!\n\nUse it for:\n• Research questions\n• Paper summaries\n• Literature reviews\n• Academic discussions\n• Research recommendations\n\nNote: I help with platform features, Yggdrasil helps with research!",
        links: &[("Open Yggdrasil", "/chat/yggdrasil_chatbot/")],
    },
    // --- Blog & publishing ---
    StaticRule {
        triggers: &["blog", "write post", "article"],
        answer: "📝 Research Blog lets you share insights!\n\nTo write a post:\n1. Go to 'Blog' in the menu\n2. Click 'Write Post'\n3. Write your content\n4. Submit for approval\n\nPosts are reviewed by moderators before publishing.",
        links: &[("View Blog", "/papers/blog/")],
    },
    StaticRule {
        triggers: &["publisher", "researchers", "authors"],
        answer: "👨‍🔬 Publishers are researchers who share papers!\n\n• Browse all publishers\n• Follow publishers\n• See their papers\n• View their profiles\n• Check their H-index",
        links: &[("Browse Publishers", "/accounts/publishers/")],
    },
    // --- Analytics ---
    StaticRule {
        triggers: &["analytics", "statistics", "stats", "metrics"],
        answer: "📈 Analytics Dashboard shows:\n• Reading statistics\n• Paper impact metrics\n• Collaboration network\n• Trending topics\n• Research field analytics",
        links: &[("Research Dashboard", "/analytics/dashboard/")],
    },
    StaticRule {
        triggers: &["trending", "popular", "hot topics"],
        answer: "🔥 Trending Topics shows:\n• Most viewed papers\n• Popular research areas\n• Growing fields\n• Weekly trends\n• Category-based trends",
        links: &[("View Trending", "/analytics/trending/")],
    },
    // --- Account & access ---
    StaticRule {
        triggers: &["login", "sign in", "access"],
        answer: "🔐 To access your account:\n1. Click 'Login' in the top right\n2. Enter your email and password\n3. Click 'Sign In'\n\nForgot password? Use the reset link on the login page.",
        links: &[("Login", "/accounts/login/")],
    },
    StaticRule {
        triggers: &["register", "sign up", "create account"],
        answer: "✨ To create an account:\n1. Click 'Register' in the top right\n2. Fill in your details\n3. Choose your user type (Student/Researcher/Publisher)\n4. Submit\n\nYou'll be able to access all platform features!",
        links: &[("Register", "/accounts/register/")],
    },
    // --- Help & support ---
    StaticRule {
        triggers: &["help", "support", "assistance", "how to"],
        answer: "🆘 I'm here to help!\n\nAsk me about:\n• Uploading papers\n• Using features\n• Navigation\n• Groups & collaboration\n• Your account\n• Any platform feature\n\nFor research questions, use Yggdrasil!",
        links: &[],
    },
    StaticRule {
        triggers: &["share", "sharing", "social media"],
        answer: "🔗 To share papers:\n1. Open any paper\n2. Click the 'Share' button\n3. Choose platform:\n   • Twitter\n   • LinkedIn\n   • Facebook\n   • Email\n   • Copy Link\n\nShares are tracked in your analytics!",
        links: &[],
    },
    StaticRule {
        triggers: &["like", "upvote", "favorite paper"],
        answer: "❤️ To like a paper:\n• Click the heart icon on any paper\n• View liked papers in your profile\n• See total likes on papers\n\nLikes help show paper popularity!",
        links: &[],
    },
];

pub const DEFAULT_PROMPTS: &[&str] = &[
    "I'm not sure about that. Could you rephrase your question?",
    "Hmm, I don't have information on that. Try asking about papers, groups, or platform features!",
    "I didn't quite understand. Ask me about uploading papers, bookmarks, groups, or other features!",
];

pub const EXAMPLE_QUERIES: &[&str] = &[
    "How do I upload a paper?",
    "Where are my bookmarks?",
    "What is Yggdrasil?",
    "How do I join a group?",
];
