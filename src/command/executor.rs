//! Command execution: map a resolution onto host actions

use crate::command::resolver::ContextResolver;
use crate::core::messages::Feedback;
use crate::core::types::{Language, UserId};
use crate::host::{Action, ComposerMode, FocusContext, Host, ScrollState, View};
use crate::intent::{Intent, Resolution, SaveAction, Slots};

/// One planned action plus what to tell the user about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub action: Action,
    pub feedback: Option<Feedback>,
}

impl Step {
    fn silent(action: Action) -> Self {
        Self {
            action,
            feedback: None,
        }
    }

    fn announced(action: Action, feedback: Feedback) -> Self {
        Self {
            action,
            feedback: Some(feedback),
        }
    }
}

/// What a run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Actions handed to the host, in order
    pub dispatched: Vec<Action>,
    /// Set when the run stopped on a failure
    pub failure: Option<Feedback>,
}

impl DispatchReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Stateless mapping from resolutions to actions
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    language: Language,
}

impl Dispatcher {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Execute `resolution` against one focus snapshot.
    ///
    /// A chain runs its steps in order against the same snapshot and stops
    /// at the first step that fails.
    pub fn execute<H: Host + ?Sized>(
        &self,
        resolution: &Resolution,
        focus: &FocusContext,
        actor: &UserId,
        host: &mut H,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        let steps: Vec<&Resolution> = if resolution.is_chain() {
            resolution.steps().iter().collect()
        } else {
            vec![resolution]
        };

        if steps.is_empty() {
            let feedback = Feedback::GenericFailure;
            tracing::info!(intent = %resolution.intent, "nothing to dispatch");
            host.set_user_message(&feedback.render(self.language));
            report.failure = Some(feedback);
            return report;
        }

        for step in steps {
            match self.plan(step, focus, actor) {
                Ok(planned) => {
                    tracing::info!(intent = %step.intent, action = ?planned.action, "dispatching");
                    host.dispatch(planned.action.clone());
                    report.dispatched.push(planned.action);
                    if let Some(feedback) = planned.feedback {
                        host.set_user_message(&feedback.render(self.language));
                    }
                }
                Err(feedback) => {
                    tracing::info!(intent = %step.intent, ?feedback, "command not carried out");
                    host.set_user_message(&feedback.render(self.language));
                    report.failure = Some(feedback);
                    break;
                }
            }
        }

        report
    }

    /// Decide the action for a single (non-chain) resolution
    pub fn plan(
        &self,
        resolution: &Resolution,
        focus: &FocusContext,
        actor: &UserId,
    ) -> Result<Step, Feedback> {
        let intent = resolution.intent;
        if intent.takes_target() {
            return plan_targeted(intent, &resolution.slots, focus, actor);
        }

        let slots = &resolution.slots;
        let step = match intent {
            Intent::OpenFeed => Step::silent(Action::Navigate(View::Feed)),
            Intent::OpenExplore => Step::announced(Action::Navigate(View::Explore), Feedback::OpeningExplore),
            Intent::OpenReels => Step::announced(Action::Navigate(View::Reels), Feedback::OpeningReels),
            Intent::OpenProfile => plan_profile(slots, focus)?,
            Intent::OpenMessages => Step::silent(Action::Navigate(View::Messages)),
            Intent::OpenGroupsHub => Step::silent(Action::Navigate(View::GroupsHub)),
            Intent::OpenRoomsHub => Step::silent(Action::Navigate(View::RoomsHub)),
            Intent::OpenAudioRooms => Step::silent(Action::Navigate(View::AudioRooms)),
            Intent::OpenVideoRooms => Step::silent(Action::Navigate(View::VideoRooms)),
            Intent::OpenFriendsPage => Step::silent(Action::Navigate(View::Friends {
                initial_tab: slots.initial_tab.clone(),
            })),
            Intent::OpenSettings => Step::silent(Action::Navigate(View::Settings)),
            Intent::OpenAdsCenter => Step::silent(Action::Navigate(View::AdsCenter)),
            Intent::GoBack => Step::silent(Action::Navigate(View::Back)),
            Intent::ReloadPage => Step::announced(Action::Reload, Feedback::Reloading),
            Intent::Help => Step::announced(Action::Navigate(View::Help), Feedback::OpeningHelp),
            Intent::PlayPost => Step::silent(Action::Play),
            Intent::PausePost => Step::silent(Action::Pause),
            Intent::NextPost => Step::silent(Action::FocusNext),
            Intent::PreviousPost => Step::silent(Action::FocusPrevious),
            Intent::ScrollUp => Step::silent(Action::SetScroll(ScrollState::Up)),
            Intent::ScrollDown => Step::silent(Action::SetScroll(ScrollState::Down)),
            Intent::StopScroll => Step::silent(Action::SetScroll(ScrollState::None)),
            Intent::CreatePost => Step::silent(Action::StartComposer(ComposerMode::Text)),
            Intent::CreateVoicePost => Step::silent(Action::StartComposer(ComposerMode::Voice)),
            Intent::CreatePoll => Step::silent(Action::StartComposer(ComposerMode::Poll)),
            Intent::GenerateImage => Step::silent(Action::StartComposer(ComposerMode::Image {
                prompt: slots.prompt.clone().unwrap_or_default(),
            })),
            Intent::SearchUser => {
                let query = match person(slots, focus)? {
                    Some(name) => name,
                    None => slots
                        .search_query
                        .clone()
                        .ok_or(Feedback::GenericFailure)?,
                };
                Step::silent(Action::Search { query })
            }
            Intent::OpenChat => match person(slots, focus)? {
                Some(with) => Step::silent(Action::Navigate(View::Conversation { with })),
                None => Step::silent(Action::Navigate(View::Messages)),
            },
            Intent::SaveSettings => Step::silent(Action::SaveSettings),
            // No handler on the feed screen
            _ => return Err(Feedback::GenericFailure),
        };

        Ok(step)
    }
}

/// The person a people-directed intent names.
///
/// An explicit name is taken as spoken. A contextual reference means the
/// author of the focused post. `None` when neither is given.
fn person(slots: &Slots, focus: &FocusContext) -> Result<Option<String>, Feedback> {
    if let Some(name) = slots.target_name() {
        return Ok(Some(name.to_string()));
    }
    if !slots.is_contextual() {
        return Ok(None);
    }
    let author = ContextResolver::new(focus)
        .resolve(slots)
        .map_err(|failure| failure.feedback())?;
    Ok(Some(author.display_name.clone()))
}

fn plan_profile(slots: &Slots, focus: &FocusContext) -> Result<Step, Feedback> {
    let initial_tab = slots.initial_tab.clone();
    let step = match person(slots, focus)? {
        Some(name) => Step::announced(
            Action::Navigate(View::Profile {
                name: Some(name.clone()),
                initial_tab,
            }),
            Feedback::OpeningProfile { name },
        ),
        None => Step::announced(
            Action::Navigate(View::Profile {
                name: None,
                initial_tab,
            }),
            Feedback::OpeningOwnProfile,
        ),
    };
    Ok(step)
}

fn plan_targeted(
    intent: Intent,
    slots: &Slots,
    focus: &FocusContext,
    actor: &UserId,
) -> Result<Step, Feedback> {
    let target = ContextResolver::new(focus)
        .resolve(slots)
        .map_err(|failure| failure.feedback())?;
    let post = target.id.clone();

    let step = match intent {
        Intent::ReactToPost => {
            let reaction = slots.reaction_type.unwrap_or_default();
            Step::announced(
                Action::React { post, reaction },
                Feedback::Reacted {
                    emoji: reaction.emoji().to_string(),
                    author: target.display_name.clone(),
                },
            )
        }
        Intent::Comment | Intent::ViewComments => {
            Step::silent(Action::OpenComments { post, draft: None })
        }
        Intent::AddCommentText => {
            let draft = slots
                .comment_text
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string);
            match draft {
                Some(text) => Step::announced(
                    Action::OpenComments {
                        post,
                        draft: Some(text.clone()),
                    },
                    Feedback::CommentDraft { text },
                ),
                None => Step::silent(Action::OpenComments { post, draft: None }),
            }
        }
        Intent::Share => Step::silent(Action::Share { post }),
        Intent::SavePost => Step::silent(Action::SetSaved {
            post,
            saved: slots.action.unwrap_or_default() == SaveAction::Save,
        }),
        Intent::HidePost => Step::silent(Action::Hide { post }),
        Intent::DeletePost => {
            if !target.is_owned_by(actor) {
                return Err(Feedback::DeleteDenied);
            }
            Step::silent(Action::Delete { post })
        }
        Intent::CopyLink => Step::silent(Action::CopyLink { post }),
        Intent::ReportPost => Step::silent(Action::Report { post }),
        Intent::OpenPostViewer => Step::silent(Action::OpenViewer { post }),
        _ => return Err(Feedback::GenericFailure),
    };

    Ok(step)
}
