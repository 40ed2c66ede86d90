//! User-facing feedback, rendered in the configured reply language

use crate::core::types::Language;

/// Everything the pipeline may say back to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Nothing understood, or the command has no handler on this screen
    GenericFailure,
    /// `target_name` did not match any visible post
    TargetNotFound { name: String },
    /// No explicit target and nothing focused
    FocusFirst,
    /// Delete attempted on someone else's post
    DeleteDenied,
    Reacted { emoji: String, author: String },
    CommentDraft { text: String },
    OpeningProfile { name: String },
    OpeningOwnProfile,
    OpeningExplore,
    OpeningReels,
    Reloading,
    OpeningHelp,
}

impl Feedback {
    pub fn render(&self, language: Language) -> String {
        match language {
            Language::En => self.render_en(),
            Language::Bn => self.render_bn(),
        }
    }

    fn render_en(&self) -> String {
        match self {
            Feedback::GenericFailure => {
                "Sorry, I didn't understand that. Please try again.".to_string()
            }
            Feedback::TargetNotFound { name } => {
                format!("Couldn't find a post by {} on your screen.", name)
            }
            Feedback::FocusFirst => {
                "Sorry, I couldn't figure out which post you meant. Please scroll to a post first."
                    .to_string()
            }
            Feedback::DeleteDenied => "You can only delete your own posts.".to_string(),
            Feedback::Reacted { emoji, author } => {
                format!("Reacted with {} to {}'s post.", emoji, author)
            }
            Feedback::CommentDraft { text } => format!(
                "Adding comment \"{}\". You can say 'post comment' to publish.",
                text
            ),
            Feedback::OpeningProfile { name } => format!("Opening profile for {}.", name),
            Feedback::OpeningOwnProfile => "Opening your profile.".to_string(),
            Feedback::OpeningExplore => "Opening Explore.".to_string(),
            Feedback::OpeningReels => "Opening Reels.".to_string(),
            Feedback::Reloading => "Reloading your feed...".to_string(),
            Feedback::OpeningHelp => "Opening the command list.".to_string(),
        }
    }

    fn render_bn(&self) -> String {
        match self {
            Feedback::GenericFailure => {
                "দুঃখিত, আমি বুঝতে পারিনি। আবার চেষ্টা করুন।".to_string()
            }
            Feedback::TargetNotFound { name } => {
                format!("আপনার স্ক্রিনে {}-এর কোনো পোস্ট খুঁজে পাইনি।", name)
            }
            Feedback::FocusFirst => {
                "দুঃখিত, কোন পোস্টের কথা বলছেন বুঝতে পারিনি। আগে একটি পোস্টে যান।".to_string()
            }
            Feedback::DeleteDenied => "আপনি শুধু নিজের পোস্ট ডিলিট করতে পারবেন।".to_string(),
            Feedback::Reacted { emoji, author } => {
                format!("{}-এর পোস্টে {} রিয়্যাক্ট দেওয়া হয়েছে।", author, emoji)
            }
            Feedback::CommentDraft { text } => format!(
                "কমেন্ট \"{}\" যোগ করা হচ্ছে। প্রকাশ করতে 'post comment' বলুন।",
                text
            ),
            Feedback::OpeningProfile { name } => format!("{}-এর প্রোফাইল খোলা হচ্ছে।", name),
            Feedback::OpeningOwnProfile => "আপনার প্রোফাইল খোলা হচ্ছে।".to_string(),
            Feedback::OpeningExplore => "এক্সপ্লোর খোলা হচ্ছে।".to_string(),
            Feedback::OpeningReels => "রিলস খোলা হচ্ছে।".to_string(),
            Feedback::Reloading => "আপনার ফিড রিলোড হচ্ছে...".to_string(),
            Feedback::OpeningHelp => "কমান্ডের তালিকা খোলা হচ্ছে।".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_target() {
        let text = Feedback::TargetNotFound {
            name: "Zorro".into(),
        }
        .render(Language::En);
        assert_eq!(text, "Couldn't find a post by Zorro on your screen.");

        let text = Feedback::TargetNotFound {
            name: "Zorro".into(),
        }
        .render(Language::Bn);
        assert!(text.contains("Zorro"));
    }

    #[test]
    fn test_reaction_message() {
        let text = Feedback::Reacted {
            emoji: "❤️".into(),
            author: "Maria".into(),
        }
        .render(Language::En);
        assert_eq!(text, "Reacted with ❤️ to Maria's post.");
    }
}
