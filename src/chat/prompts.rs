// src/chat/prompts.rs — System prompts for intake and extraction
//
// Prompts are assembled with plain string building. The intake persona and
// the synthesis rules (UUIDs, slugs, timestamps, inferred budgets) follow the
// original assistant's behavior.

/// JSON shape embedded in the extraction prompt. Kept as a literal so the
/// model sees exactly the wire format the validator expects.
const PAYLOAD_SHAPE: &str = r#"{
  "project": {
    "id": "<uuid>",
    "title": "<string>",
    "slug": "<kebab-case from title>",
    "description": "<string or null>",
    "image": "<string, empty if unknown>",
    "budget": { "minimum": <number>, "total": <number>, "from": <number or null> },
    "duration": { "total": <number>, "type": "day|week|month" },
    "published": <bool>,
    "status": "created|progress|done",
    "fundsStatus": "pending|active|completed|cancelled",
    "fundsUntil": "<ISO 8601 date-time>",
    "isFixed": <bool>,
    "viewed": <number>,
    "createdAt": "<ISO 8601 date-time>",
    "updatedAt": "<ISO 8601 date-time>"
  },
  "talents": [
    {
      "id": "<uuid>",
      "name": "<role name>",
      "description": "<string or null>",
      "requirements": ["<skill>", "..."],
      "budget": <number>,
      "experience": "entry|intermediate|expert",
      "payment": "fixed|hourly",
      "status": "open|filled|closed",
      "createdAt": "<ISO 8601 date-time>",
      "updatedAt": "<ISO 8601 date-time>"
    }
  ]
}"#;

/// System prompt for the information-gathering phase.
pub fn intake_prompt() -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(
        "You are Yang Chatting-an, a business creator assistant. You help users \
         define their projects and the talent they need to hire.\n\n",
    );
    prompt.push_str(
        "For each user message:\n\
         - Analyze the information provided so far.\n\
         - Ask about missing details: title, description, budget range, \
           duration, and the roles to hire with their required skills.\n\
         - Focus on one or two missing fields at a time to keep the \
           conversation natural.\n\
         - Offer concrete suggestions based on what the user already said.\n\n",
    );
    prompt.push_str(
        "Keep responses short and focused on the current question. Do not \
         repeat previous conversation history. Use Indonesian language for \
         responses.\n\n",
    );
    prompt.push_str(
        "When the user wants to finish, they will send #submit, #generate, or \
         #selesai. Do not produce JSON yourself during the conversation.\n",
    );

    prompt
}

/// System prompt for the extraction call. The conversation is passed as the
/// message history; this prompt only carries the output contract.
pub fn extraction_prompt() -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str(
        "Based on the conversation, produce the complete project and talent \
         data as a single JSON object. Respond with JSON only, no commentary, \
         no markdown fences.\n\n",
    );
    prompt.push_str("Output format:\n\n");
    prompt.push_str(PAYLOAD_SHAPE);
    prompt.push_str("\n\nRules:\n");
    prompt.push_str(
        "- Generate UUIDs for ids, a slug from the title, and current ISO \
           timestamps for dates.\n\
         - For information the user never stated, make realistic assumptions \
           from the project context and industry norms. Budgets must be \
           coherent: minimum <= total, and talent budgets within the project \
           total.\n\
         - Create one talent entry per distinct role the project implies \
           (e.g. frontend vs backend), each with a non-empty requirements \
           list.\n\
         - New projects: status \"created\", fundsStatus \"pending\", \
           published false, viewed 0.\n",
    );

    prompt
}

/// Follow-up prompt after a failed attempt: feed the issues back so the model
/// can correct its own output.
pub fn repair_prompt(issues: &[String]) -> String {
    let mut prompt = String::with_capacity(512);

    prompt.push_str(
        "The JSON you produced was rejected. Fix the problems below and \
         return the full corrected JSON object, nothing else:\n\n",
    );
    for issue in issues {
        prompt.push_str("- ");
        prompt.push_str(issue);
        prompt.push('\n');
    }

    prompt
}

/// Assistant reply returned to the caller when extraction succeeds
/// (unchanged from the original service).
pub fn finalized_reply() -> String {
    "Baik, saya telah menyimpan detail project Anda. Apakah ada yang bisa saya bantu lagi?".into()
}

/// Assistant reply when extraction could not produce valid data: apologize
/// and ask for what is still missing.
pub fn extraction_failed_reply(issues: &[String]) -> String {
    let mut reply = String::from(
        "Maaf, saya masih membutuhkan beberapa informasi penting untuk \
         melengkapi detail project.",
    );
    if !issues.is_empty() {
        reply.push_str(" Mohon lengkapi: ");
        reply.push_str(&issues.join("; "));
        reply.push('.');
    }
    reply
}
