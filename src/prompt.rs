use crate::models::ChatRequest;

pub fn build_prompt(request: &ChatRequest) -> String {

    // Request contains the new message plus the full prior history,
    // oldest turn first. Each turn is rendered as a user line and an
    // assistant line, then the new message is appended with a bare
    // "Assistant:" tail so the model continues from there.
    let mut prompt = String::new();

    for turn in &request.history {
        prompt.push_str(&format!(
            "User: {}\nAssistant: {}\n",
            turn.user, turn.assistant
        ));
    }

    // no trailing newline after the final "Assistant:"
    prompt.push_str(&format!("User: {}\nAssistant:", request.message));

    prompt

}
