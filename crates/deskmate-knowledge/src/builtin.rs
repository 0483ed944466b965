//! Built-in office-assistant Q&A records.
//!
//! Deployment-specific entries (site policies, departments, contacts) belong
//! in an external knowledge TOML file referenced from `[knowledge] path`.

use crate::EntrySpec;

fn entry(question: &str, answer: &str, keywords: &[&str]) -> EntrySpec {
    EntrySpec {
        question: question.to_string(),
        answer: answer.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// The default entry set, in match-priority order.
pub fn entries() -> Vec<EntrySpec> {
    vec![
        entry(
            "What is your name",
            "I'm your Deskmate office assistant, here to help you with your office tasks!",
            &["name", "who are you", "assistant name", "chatbot name"],
        ),
        entry(
            "What can you do",
            "I can help you manage tasks, set reminders, schedule calendar events, and answer general office questions.",
            &["features", "capabilities", "help", "what can you do", "services", "abilities"],
        ),
        entry(
            "How do I create a task",
            "Just tell me the task title and details, or say 'Create a task: [task details]'.",
            &["add task", "new task", "create task", "task creation", "task add"],
        ),
        entry(
            "How do I set a reminder",
            "You can say 'Set a reminder for [reminder details] at [time]'.",
            &["add reminder", "set reminder", "remind me", "reminder creation", "reminder add"],
        ),
        entry(
            "How do I schedule a meeting",
            "Say 'Schedule a meeting with [person] on [date] at [time]' or use the Calendar tab.",
            &["add meeting", "schedule meeting", "meeting setup", "meeting calendar", "book meeting"],
        ),
        entry(
            "How do I get help",
            "Just type or say 'help' and I'll show you what I can do!",
            &["help", "support", "assistance", "how to use", "usage"],
        ),
        entry(
            "How do I logout",
            "To logout, go to the settings screen and tap 'Logout'.",
            &["logout", "sign out", "log out", "exit account"],
        ),
        entry(
            "How do I update my profile",
            "Go to the settings screen and tap 'Edit Profile' to update your information.",
            &["edit profile", "update profile", "change profile", "profile update"],
        ),
        entry(
            "How do I enable dark mode",
            "You can enable dark mode in the settings screen under 'Appearance'.",
            &["dark mode", "night mode", "theme", "appearance"],
        ),
        entry(
            "How do I change notification settings",
            "Notification settings can be changed in the settings screen under 'Notifications'.",
            &["notification", "alerts", "change notification", "notification settings"],
        ),
        entry(
            "How do I use voice commands",
            "Tap the microphone icon and speak your command, such as 'Set a reminder for 3 PM'.",
            &["voice command", "microphone", "speak", "voice input", "voice assistant"],
        ),
        entry(
            "What features do you support",
            "I support task management, reminders, calendar events, daily briefings, and general office questions.",
            &["features", "capabilities", "what can you do", "abilities", "functions"],
        ),
        entry(
            "How do I get a daily briefing",
            "Just say 'Give me a daily briefing' and I'll summarize your schedule and tasks for today.",
            &["daily briefing", "today's schedule", "summary", "briefing"],
        ),
        entry(
            "How do I backup my data",
            "Data backup options are available in the settings screen under 'Backup & Restore'.",
            &["backup", "save data", "data backup", "restore data"],
        ),
        entry(
            "How do I restore my data",
            "Go to settings, select 'Backup & Restore', and choose 'Restore' to recover your data.",
            &["restore", "recover data", "data restore", "backup restore"],
        ),
        entry(
            "How do I change the app language",
            "Language settings can be changed in the settings screen under 'Language'.",
            &["language", "change language", "app language", "set language"],
        ),
    ]
}
