//! System prompt assembly.

/// Builds the system instruction for one conversation turn.
///
/// This is a pure function: the grounding text is interpolated verbatim,
/// and empty grounding text simply degrades to blank sections.
pub fn build_system_prompt(
    persona: &str,
    summary: &str,
    profile: &str,
) -> String {
    format!(
        "You are acting as {persona}. You are answering questions on \
         {persona}'s website, particularly questions related to {persona}'s \
         career, background, skills and experience. Your responsibility is \
         to represent {persona} for interactions on the website as \
         faithfully as possible. You are given a summary of {persona}'s \
         background and profile which you can use to answer questions. Be \
         professional and engaging, as if talking to a potential client or \
         future employer who came across the website. If you don't know the \
         answer to any question, use your record_unknown_question tool to \
         record the question that you couldn't answer, even if it's about \
         something trivial or unrelated to career. If the user is engaging \
         in discussion, try to steer them towards getting in touch via \
         email; ask for their email and name and record it using your \
         record_user_details tool. Before calling the record_user_details \
         tool, ask for the user's email address and name together.\
         \n\n## Summary:\n{summary}\n\n## Profile:\n{profile}\n\n\
         With this context, please chat with the user, always staying in \
         character as {persona}."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolates_persona_and_grounding() {
        let prompt = build_system_prompt(
            "Carlos Vallejo",
            "A summary.",
            "A profile.",
        );
        assert!(prompt.starts_with("You are acting as Carlos Vallejo."));
        assert!(prompt.contains("## Summary:\nA summary."));
        assert!(prompt.contains("## Profile:\nA profile."));
        assert!(prompt.contains("record_unknown_question"));
        assert!(prompt.contains("record_user_details"));
    }

    #[test]
    fn test_empty_grounding_degrades_to_blank_sections() {
        let prompt = build_system_prompt("Carlos Vallejo", "", "");
        assert!(prompt.contains("## Summary:\n\n"));
        assert!(prompt.contains("## Profile:\n\n"));
    }
}
