// Cross-cutting prompt fragments.
// Each feature that calls the LLM keeps its own prompts.rs alongside it.

/// Instruction that enforces a bare JSON object as the whole answer.
/// The generate endpoint has no system role, so this goes into the prompt body.
pub const JSON_ONLY_INSTRUCTION: &str = "\
**IMPORTANT**: Your response MUST be a single JSON object. \
DO NOT include any conversational text, explanations, markdown code block wrappers (like ```json), \
or any other formatting outside the JSON object itself.";

/// Closing line repeated after long inputs so the instruction is not lost.
pub const JSON_ONLY_REMINDER: &str = "Please return ONLY the JSON object.";
