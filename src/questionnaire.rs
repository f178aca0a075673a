//! The six-question company questionnaire
//!
//! The prompt template and the parsed, per-field answer structure. The
//! template tells the model to label every answer and to write the
//! `Not Provided` sentinel explicitly for anything the text does not contain;
//! that wording is load-bearing, since per-field parsing of the labeled
//! response is what drives the crawl's completion decision. A field is
//! considered answered only when its own labeled line carries something other
//! than the sentinel, so prose mentioning "not provided" under one label
//! never poisons the others.

/// The literal marker the template instructs the model to emit for an
/// unanswerable question.
pub const SENTINEL: &str = "Not Provided";

/// The six fixed questionnaire fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Mission,
    Offerings,
    Founding,
    Headquarters,
    Leadership,
    Awards,
}

impl Field {
    /// All fields, in questionnaire order
    pub const ALL: [Field; 6] = [
        Field::Mission,
        Field::Offerings,
        Field::Founding,
        Field::Headquarters,
        Field::Leadership,
        Field::Awards,
    ];

    /// The label the model is instructed to prefix this field's answer with
    pub fn label(self) -> &'static str {
        match self {
            Field::Mission => "Mission",
            Field::Offerings => "Offerings",
            Field::Founding => "Founding",
            Field::Headquarters => "Headquarters",
            Field::Leadership => "Leadership",
            Field::Awards => "Awards",
        }
    }

    /// The question asked for this field
    pub fn question(self) -> &'static str {
        match self {
            Field::Mission => "What is the company's mission statement or core values?",
            Field::Offerings => "What products or services does the company offer?",
            Field::Founding => "When was the company founded, and who were the founders?",
            Field::Headquarters => "Where is the company's headquarters located?",
            Field::Leadership => "Who are the key executives or leadership team members?",
            Field::Awards => "Has the company received any notable awards or recognitions?",
        }
    }
}

/// One field's extracted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// The model found the fact in the supplied text
    Provided(String),
    /// The model emitted the sentinel, or the field could not be parsed
    NotProvided,
}

impl Answer {
    /// Whether this field was answered
    pub fn is_provided(&self) -> bool {
        matches!(self, Answer::Provided(_))
    }
}

/// A parsed extraction result: the six answers plus the model's raw response
/// text, which is what ultimately gets persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Questionnaire {
    pub mission: Answer,
    pub offerings: Answer,
    pub founding: Answer,
    pub headquarters: Answer,
    pub leadership: Answer,
    pub awards: Answer,
    /// The model's verbatim response
    pub raw: String,
}

impl Questionnaire {
    /// Borrow a field's answer
    pub fn answer(&self, field: Field) -> &Answer {
        match field {
            Field::Mission => &self.mission,
            Field::Offerings => &self.offerings,
            Field::Founding => &self.founding,
            Field::Headquarters => &self.headquarters,
            Field::Leadership => &self.leadership,
            Field::Awards => &self.awards,
        }
    }

    /// True iff every field is answered
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| self.answer(*f).is_provided())
    }

    /// Labels of the fields still unanswered, in questionnaire order
    pub fn missing(&self) -> Vec<&'static str> {
        Field::ALL
            .iter()
            .filter(|f| !self.answer(**f).is_provided())
            .map(|f| f.label())
            .collect()
    }

    /// Parse a model response into per-field answers.
    ///
    /// The response is scanned line by line for labeled answers; a field
    /// whose label never appears, whose answer is empty, or whose answer
    /// contains the sentinel becomes [`Answer::NotProvided`]. Numbering,
    /// bullets, and markdown emphasis around labels are tolerated.
    pub fn parse(raw: &str) -> Self {
        let mut collected: [Option<String>; 6] = Default::default();
        let mut current: Option<usize> = None;

        for line in raw.lines() {
            if let Some((field, rest)) = match_label(line) {
                let index = field_index(field);
                collected[index] = Some(rest.to_string());
                current = Some(index);
            } else if let Some(index) = current {
                if let Some(value) = collected[index].as_mut() {
                    value.push('\n');
                    value.push_str(line);
                }
            }
        }

        let mut answers = collected
            .into_iter()
            .map(|value| answer_from(value.as_deref()));

        // In Field::ALL order
        Self {
            mission: answers.next().unwrap_or(Answer::NotProvided),
            offerings: answers.next().unwrap_or(Answer::NotProvided),
            founding: answers.next().unwrap_or(Answer::NotProvided),
            headquarters: answers.next().unwrap_or(Answer::NotProvided),
            leadership: answers.next().unwrap_or(Answer::NotProvided),
            awards: answers.next().unwrap_or(Answer::NotProvided),
            raw: raw.to_string(),
        }
    }
}

/// Format the full extraction prompt for the supplied page text
pub fn prompt_for(text: &str) -> String {
    let mut prompt = format!(
        "Please extract the following information from the given text. \
         Answer each question on its own line, prefixed with its label \
         exactly as shown. If any information is missing from the text, \
         write \"{SENTINEL}\" explicitly after that label.\n",
    );
    for field in Field::ALL {
        prompt.push_str(&format!("{}: {}\n", field.label(), field.question()));
    }
    prompt.push_str("\nText: ");
    prompt.push_str(text);
    prompt
}

fn field_index(field: Field) -> usize {
    Field::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or_default()
}

fn answer_from(value: Option<&str>) -> Answer {
    match value {
        Some(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.to_lowercase().contains("not provided") {
                Answer::NotProvided
            } else {
                Answer::Provided(trimmed.to_string())
            }
        }
        None => Answer::NotProvided,
    }
}

/// Match a labeled answer line, tolerating leading numbering, bullets, and
/// markdown emphasis. Returns the field and the text after the colon.
fn match_label(line: &str) -> Option<(Field, &str)> {
    let trimmed = line
        .trim_start()
        .trim_start_matches(|c: char| {
            c.is_ascii_digit() || matches!(c, '.' | ')' | '-' | '*' | '#' | ' ')
        });

    for field in Field::ALL {
        let label = field.label();
        let Some(head) = trimmed.get(..label.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(label) {
            continue;
        }
        let rest = trimmed[label.len()..].trim_start_matches('*').trim_start();
        if let Some(rest) = rest.strip_prefix(':') {
            return Some((field, rest.trim_start_matches('*').trim()));
        }
    }
    None
}
