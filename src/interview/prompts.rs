use crate::apf::{Transcript, UserMaterials};

pub const FIRST_PROMPT_CHAR_LIMIT: usize = 4_000;
pub const RETRY_PROMPT_CHAR_LIMIT: usize = 1_000;

pub const INTERVIEWER_SYSTEM_PROMPT: &str = "\
You are an expert interviewer for an \"Anti-Portfolio\".
Your goal is to understand WHO this person is, not what they have done.
You must ask exactly ONE question.

OUTPUT FORMAT: write the question as PLAIN TEXT. Never use markdown, \
asterisks, bold, italics, bullet lists or any special formatting.

ANALYZE THE USER'S MATERIALS to ask SPECIFIC, PERSONALIZED questions.

WHAT AN ANTI-PORTFOLIO IS:
Not a CV. A format that shows:
- HOW the person thinks and solves problems (not WHAT they did)
- Their PROCESS and methodology (not just final output)
- Their UNIQUE imprint (what separates them from others with the same job title)
- Their FAILURES and what they learned
- What they DO NOT do and what they HATE

MANDATORY AREAS TO COVER (6 QUESTIONS TOTAL):
1. EDGE / UNIQUENESS: what they do better than anyone with the same role.
2. METHODOLOGY / PROCESS: how they approach a new problem, their personal rules.
3. FAILURES AND LESSONS: the professional failure that taught them the most.
4. LOVES / HATES: what drives them mad about their field, what they cannot stand.
5. ANTI-GOALS: what they refuse to do, requests they always decline.
6. PHILOSOPHY / VALUES: their work philosophy, advice for beginners, a contrarian belief.

ADAPTIVE LOGIC:
- Detailed answer: press on the details, ask for the deeper why.
- Vague or short answer: ask for one concrete example.
- Never repeat areas already covered; move to the next one.
- Shape each question around what the previous answers revealed.

Be direct and incisive. Look for the PERSON behind the professional.";

/// Mandatory topic for turns 1..=5. Turn 0 is the opening question and has
/// no fixed topic.
pub fn topic_focus(turn_index: usize) -> &'static str {
    match turn_index {
        1 => {
            "QUESTION 2 - METHODOLOGY/PROCESS: ask about their working process, \
             how they approach problems, their personal rules."
        }
        2 => {
            "QUESTION 3 - FAILURES: ask about a professional failure and what \
             they learned. You want a true story with a concrete lesson."
        }
        3 => {
            "QUESTION 4 - LOVES/HATES: ask what drives them mad about their \
             field, what they hate, which common practices they cannot stand."
        }
        4 => {
            "QUESTION 5 - ANTI-GOALS: ask what they refuse to do, which \
             requests they always decline, what they will never do."
        }
        5 => {
            "QUESTION 6 - PHILOSOPHY: final question. Ask about their work \
             philosophy, advice for beginners, or a contrarian belief of theirs."
        }
        _ => "",
    }
}

/// Steering hint picked from how much the user just said.
pub fn adaptation_hint(answer: &str) -> &'static str {
    let word_count = answer.split_whitespace().count();
    if word_count < 10 {
        "The user was vague or brief. Ask a more specific question or request \
         a concrete example to draw them out."
    } else if word_count > 40 {
        "The user was very detailed. Pick one specific detail from their \
         answer and dig into it."
    } else {
        "Medium-length answer. Try to go deeper."
    }
}

/// Opening prompt: identity header when a name is present, then a bounded
/// excerpt of everything the user provided.
pub fn first_prompt(materials: &UserMaterials) -> String {
    let identity = if materials.personal_data.name.trim().is_empty() {
        String::new()
    } else if materials.personal_data.location.trim().is_empty() {
        format!("CANDIDATE: {}\n\n", materials.personal_data.name)
    } else {
        format!(
            "CANDIDATE: {} ({})\n\n",
            materials.personal_data.name, materials.personal_data.location
        )
    };

    format!(
        "{identity}USER MATERIALS TO ANALYZE:\n{}\n\n\
         TASK: analyze these materials and ask the FIRST interview question.\n\
         The question must be SPECIFIC and grounded in concrete details found in the materials.\n\
         If projects, technologies, roles or experiences are mentioned, use those details to personalize the question.\n\
         Try to surface the trade-offs, failures or hard decisions hiding behind what the user wrote.",
        excerpt(&materials.combined(), FIRST_PROMPT_CHAR_LIMIT)
    )
}

/// Condensed prompt for the single retry after a failed opening call.
pub fn first_retry_prompt(materials: &UserMaterials) -> String {
    format!(
        "Based on these materials: \"{}\", ask one question to uncover the \
         trade-offs and real challenges this person has faced.",
        excerpt(&materials.combined(), RETRY_PROMPT_CHAR_LIMIT)
    )
}

/// Context block appended to the user's latest answer on a follow-up turn.
pub fn advance_context(answer: &str, turn_index: usize) -> String {
    format!(
        "{answer}\n\n---\n\
         CONTEXT FOR THE AI: this is question number {} of 6.\n{}\n\n\
         MANDATORY TOPIC FOR THIS QUESTION:\n{}\n\n\
         IMPORTANT:\n\
         - The question must cover the TOPIC above\n\
         - Personalize it around what the user has said so far\n\
         - Do NOT repeat questions about areas already explored\n\
         Produce the next question.",
        turn_index + 1,
        adaptation_hint(answer),
        topic_focus(turn_index)
    )
}

/// Condensed retry prompt built from a truncated conversation summary.
pub fn advance_retry_prompt(transcript: &Transcript, answer: &str) -> String {
    format!(
        "Conversation so far:\n{}\n\nLatest answer: {answer}\n\n\
         Ask one relevant follow-up question.",
        transcript.summary(100)
    )
}

/// Char-bounded prefix. Prompt budgets are counted in characters, not bytes.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
