//! Parse free-form utterances into resolutions with the remote model
//!
//! The model only classifies. Its reply must fit the same `Resolution`
//! shape the local stages produce, and anything that does not is rejected
//! here so the fallback stage can degrade it to `unknown`.

use crate::core::error::{Result, VoiceError};
use crate::intent::{Intent, Resolution, ResolutionSource, SlotName};
use crate::llm::client::LlmClient;
use crate::llm::context::NluContext;

/// Parse a command with the remote model
///
/// # Arguments
/// * `client` - The LLM client to use for parsing
/// * `input` - The raw utterance
/// * `context` - Names on screen, for disambiguation
pub async fn parse_command(
    client: &LlmClient,
    input: &str,
    context: &NluContext,
) -> Result<Resolution> {
    let system_prompt = system_prompt();
    let user_prompt = user_prompt(input, context);

    let response = client.complete(&system_prompt, &user_prompt).await?;
    parse_nlu_response(&response)
}

/// The user turn: hints first, then the utterance
pub fn user_prompt(input: &str, context: &NluContext) -> String {
    let summary = context.summary();
    if summary.is_empty() {
        format!("COMMAND:\n{}\n\nReturn the JSON object:", input)
    } else {
        format!(
            "CONTEXT:\n{}\nCOMMAND:\n{}\n\nReturn the JSON object:",
            summary, input
        )
    }
}

/// Decode and validate a model reply
pub fn parse_nlu_response(response: &str) -> Result<Resolution> {
    let json_str = extract_json(response)?;
    let resolution: Resolution = serde_json::from_str(json_str).map_err(|e| {
        VoiceError::MalformedResponse(format!("{} - Response: {}", e, response))
    })?;

    validate(&resolution)?;
    Ok(resolution.with_source(ResolutionSource::Remote))
}

/// Reject shapes the dispatcher could not act on unambiguously
pub fn validate(resolution: &Resolution) -> Result<()> {
    match resolution.shape_error() {
        Some(reason) => Err(VoiceError::MalformedResponse(reason)),
        None => Ok(()),
    }
}

/// Extract JSON object from LLM response (handles surrounding text)
pub fn extract_json(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| VoiceError::MalformedResponse("No JSON found in response".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| VoiceError::MalformedResponse("No closing brace found in response".into()))?;
    if end < start {
        return Err(VoiceError::MalformedResponse("Unbalanced JSON in response".into()));
    }
    Ok(&response[start..=end])
}

/// Available intents with their slots, one per line
fn intent_listing() -> String {
    let mut s = String::new();
    for intent in Intent::ALL {
        if matches!(intent, Intent::Unknown | Intent::ChainedCommand) {
            continue;
        }
        let mut slots: Vec<&str> = Vec::new();
        if intent.takes_target() {
            slots.push(SlotName::IsContextual.as_str());
        }
        slots.extend(intent.slot_schema().iter().map(|slot| slot.as_str()));
        if intent.takes_target() && !intent.slot_schema().contains(&SlotName::TargetName) {
            slots.push(SlotName::TargetName.as_str());
        }
        if slots.is_empty() {
            s.push_str(&format!("- {}\n", intent.name()));
        } else {
            s.push_str(&format!("- {} (slots: {})\n", intent.name(), slots.join(", ")));
        }
    }
    s
}

/// System prompt for command parsing
pub fn system_prompt() -> String {
    format!(
        r#"You classify voice commands for a social media app. Users speak English, Bengali, or Banglish.
Convert the command into exactly one JSON object.

AVAILABLE INTENTS:
{intents}- {chain} (slots: commands)
- unknown

TARGETING RULES:
- If the command names a person or entity explicitly, emit "target_name" with that name and omit "is_contextual".
- If no name is given ("like this post", "share it"), emit "is_contextual": true and omit "target_name".
- Never emit both "is_contextual" and "target_name" for one command.
- Self references ("my profile", "amar profile") use the bare intent with no slots.
- If the utterance contains several actions, emit one "{chain}" whose "slots.commands" is an ordered array of complete command objects. Chains never nest.
- Reaction types: like, love, haha, wow, sad, angry.
- If nothing fits, emit {{"intent": "unknown"}}.

OUTPUT FORMAT (JSON only, no explanation):
{{"intent": "intent_name", "slots": {{...}}}}

Examples:
"like this post" -> {{"intent": "intent_react_to_post", "slots": {{"reaction_type": "like", "is_contextual": true}}}}
"love Maria's post" -> {{"intent": "intent_react_to_post", "slots": {{"reaction_type": "love", "target_name": "Maria"}}}}
"open my profile" -> {{"intent": "intent_open_profile"}}
"like this post and then share it" -> {{"intent": "{chain}", "slots": {{"commands": [{{"intent": "intent_react_to_post", "slots": {{"reaction_type": "like", "is_contextual": true}}}}, {{"intent": "intent_share", "slots": {{"is_contextual": true}}}}]}}}}
"#,
        intents = intent_listing(),
        chain = Intent::ChainedCommand.name(),
    )
}
