use crate::models::{CoverLetterInputs, GenerationConfig};

pub const COVER_LETTER: &str = include_str!("../data/prompts/cover_letter.txt");

const NOT_PROVIDED: &str = "Not provided";

const HONORIFICS: &[&str] = &["mr", "mrs", "ms", "mx", "dr", "prof", "professor", "sir", "madam"];
const PERSON_ROLES: &[&str] = &[
    "hiring manager",
    "recruiter",
    "talent partner",
    "talent acquisition",
    "hiring team",
];

/// Replace `{{key}}` placeholders in a template string.
///
/// Single pass over the template: substituted values are never scanned for
/// placeholders. Unknown keys are left as written.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let value = after.find("}}").and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end))
        });

        match value {
            Some((value, end)) => {
                result.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                result.push_str("{{");
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

/// Who the letter is addressed to, as far as we can tell from the free-text
/// company/recipient field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientKind {
    Person,
    Organization,
    Unspecified,
}

impl RecipientKind {
    pub fn detect(recipient: &str) -> Self {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Self::Unspecified;
        }

        let lower = recipient.to_lowercase();
        let first_word = lower
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .trim_end_matches('.');

        if HONORIFICS.contains(&first_word) || PERSON_ROLES.iter().any(|role| lower.contains(role))
        {
            Self::Person
        } else {
            Self::Organization
        }
    }
}

fn salutation_instruction(recipient: &str) -> String {
    let recipient = recipient.trim();
    match RecipientKind::detect(recipient) {
        RecipientKind::Person => format!(
            "the recipient is a person; address them directly (e.g. \"Dear {},\").",
            recipient
        ),
        RecipientKind::Organization => format!(
            "the recipient is an organization; address its hiring team (e.g. \"Dear {} Hiring Team,\").",
            recipient
        ),
        RecipientKind::Unspecified => "no recipient is known; use \"Dear Hiring Manager,\".".to_string(),
    }
}

fn sign_off_instruction(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        "close professionally (e.g. \"Sincerely,\") without a name placeholder.".to_string()
    } else {
        format!("close professionally and sign with the applicant's name, {}.", name)
    }
}

fn or_not_provided(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_PROVIDED
    } else {
        value
    }
}

/// Build the single prompt sent to the text-generation provider.
pub fn build_cover_letter_prompt(inputs: &CoverLetterInputs, config: &GenerationConfig) -> String {
    let length = config.length.words().to_string();
    let salutation = salutation_instruction(&inputs.job.company_name);
    let sign_off = sign_off_instruction(&inputs.profile.name);

    render(
        COVER_LETTER,
        &[
            ("name", or_not_provided(&inputs.profile.name)),
            (
                "recent_position",
                or_not_provided(&inputs.profile.recent_position),
            ),
            ("background", &inputs.profile.background),
            ("company", or_not_provided(&inputs.job.company_name)),
            (
                "target_position",
                or_not_provided(&inputs.job.target_position),
            ),
            ("job_description", &inputs.job.job_description),
            ("length", &length),
            ("style", config.style.label()),
            ("salutation", &salutation),
            ("sign_off", &sign_off),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobFields, LetterLength, LetterStyle, ProfileFields};

    fn sample_inputs() -> CoverLetterInputs {
        CoverLetterInputs {
            profile: ProfileFields {
                name: "Jane Doe".to_string(),
                recent_position: "Senior UX Designer".to_string(),
                background: "Led the redesign of a banking app used by 2M people.".to_string(),
            },
            job: JobFields {
                company_name: "Acme Corp".to_string(),
                target_position: "Lead Designer".to_string(),
                job_description: "Own the design system and mentor designers.".to_string(),
            },
        }
    }

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_render_does_not_rescan_substituted_values() {
        assert_eq!(
            render("{{a}} / {{b}}", &[("a", "{{b}}"), ("b", "dogs")]),
            "{{b}} / dogs"
        );
    }

    #[test]
    fn test_render_leaves_unknown_and_unclosed_placeholders() {
        assert_eq!(
            render("{{x}} {{ {{a}} {{a", &[("a", "cats")]),
            "{{x}} {{ cats {{a"
        );
    }

    #[test]
    fn test_prompt_keeps_placeholder_like_user_text() {
        let mut inputs = sample_inputs();
        inputs.profile.background = "I write {{style}} templates and {{company}} docs".to_string();
        inputs.job.job_description = "Maintain {{name}} and {{length}} pipelines.".to_string();

        let prompt = build_cover_letter_prompt(&inputs, &GenerationConfig::default());

        assert!(prompt.contains("I write {{style}} templates and {{company}} docs"));
        assert!(prompt.contains("Maintain {{name}} and {{length}} pipelines."));
    }

    #[test]
    fn test_template_has_all_placeholders() {
        for key in [
            "name",
            "recent_position",
            "background",
            "company",
            "target_position",
            "job_description",
            "length",
            "style",
            "salutation",
            "sign_off",
        ] {
            assert!(
                COVER_LETTER.contains(&format!("{{{{{}}}}}", key)),
                "missing placeholder {}",
                key
            );
        }
    }

    #[test]
    fn test_prompt_embeds_every_field_and_option() {
        let config = GenerationConfig {
            length: LetterLength::Full,
            style: LetterStyle::CreativeAndLively,
        };
        let prompt = build_cover_letter_prompt(&sample_inputs(), &config);

        assert!(prompt.contains("Jane Doe"));
        assert!(prompt.contains("Senior UX Designer"));
        assert!(prompt.contains("banking app used by 2M people"));
        assert!(prompt.contains("Acme Corp"));
        assert!(prompt.contains("Lead Designer"));
        assert!(prompt.contains("mentor designers"));
        assert!(prompt.contains("approximately 500 words"));
        assert!(prompt.contains("Creative & Lively"));
        assert!(prompt.contains("Output ONLY the cover letter text"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_prompt_marks_missing_optional_fields() {
        let mut inputs = sample_inputs();
        inputs.profile.name.clear();
        inputs.job.company_name.clear();
        let prompt = build_cover_letter_prompt(&inputs, &GenerationConfig::default());

        assert!(prompt.contains("- Name: Not provided"));
        assert!(prompt.contains("Dear Hiring Manager,"));
        assert!(prompt.contains("without a name placeholder"));
    }

    #[test]
    fn test_recipient_kind_detection() {
        assert_eq!(RecipientKind::detect(""), RecipientKind::Unspecified);
        assert_eq!(RecipientKind::detect("  "), RecipientKind::Unspecified);
        assert_eq!(RecipientKind::detect("Google"), RecipientKind::Organization);
        assert_eq!(
            RecipientKind::detect("Acme Robotics Ltd"),
            RecipientKind::Organization
        );
        assert_eq!(RecipientKind::detect("Dr. Ada Lovelace"), RecipientKind::Person);
        assert_eq!(RecipientKind::detect("Ms Smith"), RecipientKind::Person);
        assert_eq!(RecipientKind::detect("Hiring Manager"), RecipientKind::Person);
    }

    #[test]
    fn test_salutation_follows_recipient_kind() {
        let mut inputs = sample_inputs();
        let prompt = build_cover_letter_prompt(&inputs, &GenerationConfig::default());
        assert!(prompt.contains("Dear Acme Corp Hiring Team,"));

        inputs.job.company_name = "Mr. John Park".to_string();
        let prompt = build_cover_letter_prompt(&inputs, &GenerationConfig::default());
        assert!(prompt.contains("Dear Mr. John Park,"));
    }

    #[test]
    fn test_sign_off_uses_applicant_name() {
        let prompt = build_cover_letter_prompt(&sample_inputs(), &GenerationConfig::default());
        assert!(prompt.contains("sign with the applicant's name, Jane Doe."));
    }
}
