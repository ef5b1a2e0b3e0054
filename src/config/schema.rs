//! Step file schema.
//!
//! These structs map one-to-one onto the YAML step file format. They are
//! plain data; [`crate::config::compile`] turns them into runnable steps.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Root of a step file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepFile {
    /// Title shown before the run starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Steps in execution order.
    pub steps: Vec<StepConfig>,
}

/// One step as written in a step file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepConfig {
    /// Display name; may contain `${key}` references.
    pub name: String,

    /// `shell`, `script` or `prompt`. Anything else runs as a no-op.
    #[serde(rename = "type")]
    pub kind: String,

    /// Whether the step runs. Absent means always.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<Condition>,

    /// Program for shell steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Arguments for `command`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Shell script run through `sh -c`; alternative to `command`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,

    /// Output handlers for shell steps, in firing order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_output: Vec<HandlerConfig>,

    /// Question for prompt steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Used when the operator submits an empty line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Mask prompt input.
    #[serde(default, skip_serializing_if = "is_false")]
    pub silent: bool,

    /// State key that receives the prompt response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_as: Option<String>,

    /// How the prompt response is stored.
    #[serde(default)]
    pub parse: ResponseFormat,

    /// Fields a script step writes into state.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub set: BTreeMap<String, Value>,
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// How a prompt response is stored under `save_as`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Store the text as typed.
    #[default]
    String,
    /// Store `true` for y/ye/yes, otherwise `false`.
    Bool,
}

/// A step condition.
///
/// ```yaml
/// when: false
/// when: { key: xorg }                  # xorg == true
/// when: { key: gpu, equals: nvidia }
/// when: { key: vbox, not: true }       # vbox != true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    /// Fixed at load time.
    Literal(bool),
    /// Compares a state field when the step is reached.
    Key {
        key: String,
        #[serde(default = "default_equals")]
        equals: Value,
        #[serde(default, skip_serializing_if = "is_false")]
        not: bool,
    },
}

fn default_equals() -> Value {
    Value::Bool(true)
}

/// An output handler as written in a step file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandlerConfig {
    /// Regular expression a chunk must match. Absent matches everything.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expect: Option<String>,

    /// Text written to the child's stdin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write: Option<String>,

    /// Fields written into state.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub set: BTreeMap<String, Value>,

    /// Print the chunk.
    #[serde(skip_serializing_if = "is_false")]
    pub echo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_has_no_steps() {
        let file: StepFile = serde_yaml::from_str("").unwrap();
        assert!(file.name.is_none());
        assert!(file.steps.is_empty());
    }

    #[test]
    fn parses_shell_step() {
        let yaml = r#"
name: Arch install
steps:
  - name: set time
    type: shell
    command: timedatectl
    args: [set-ntp, "true"]
"#;
        let file: StepFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.name.as_deref(), Some("Arch install"));
        let step = &file.steps[0];
        assert_eq!(step.kind, "shell");
        assert_eq!(step.command.as_deref(), Some("timedatectl"));
        assert_eq!(step.args, vec!["set-ntp", "true"]);
        assert!(step.when.is_none());
    }

    #[test]
    fn parses_prompt_step() {
        let yaml = r#"
steps:
  - name: install xorg
    type: prompt
    query: "install xorg? (y/n):"
    default: "y"
    parse: bool
    save_as: xorg
"#;
        let file: StepFile = serde_yaml::from_str(yaml).unwrap();
        let step = &file.steps[0];
        assert_eq!(step.parse, ResponseFormat::Bool);
        assert_eq!(step.save_as.as_deref(), Some("xorg"));
        assert_eq!(step.default.as_deref(), Some("y"));
        assert!(!step.silent);
    }

    #[test]
    fn parse_defaults_to_string() {
        let yaml = "steps:\n  - {name: a, type: prompt, query: q}\n";
        let file: StepFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.steps[0].parse, ResponseFormat::String);
    }

    #[test]
    fn parses_literal_condition() {
        let yaml = "steps:\n  - {name: a, type: shell, run: 'true', when: false}\n";
        let file: StepFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.steps[0].when, Some(Condition::Literal(false)));
    }

    #[test]
    fn key_condition_defaults() {
        let yaml = "steps:\n  - {name: a, type: shell, run: 'true', when: {key: xorg}}\n";
        let file: StepFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            file.steps[0].when,
            Some(Condition::Key {
                key: "xorg".to_string(),
                equals: Value::Bool(true),
                not: false,
            })
        );
    }

    #[test]
    fn parses_handlers() {
        let yaml = r#"
steps:
  - name: passwd
    type: shell
    command: passwd
    on_output:
      - expect: "[Pp]assword"
        write: "${password}\n"
      - echo: true
      - set: { seen: "${output}", count: 1 }
"#;
        let file: StepFile = serde_yaml::from_str(yaml).unwrap();
        let handlers = &file.steps[0].on_output;
        assert_eq!(handlers.len(), 3);
        assert_eq!(handlers[0].expect.as_deref(), Some("[Pp]assword"));
        assert_eq!(handlers[0].write.as_deref(), Some("${password}\n"));
        assert!(handlers[1].echo);
        assert_eq!(handlers[2].set.get("count"), Some(&Value::from(1)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let yaml = "steps:\n  - {name: a, type: shell, run: 'true', comand: x}\n";
        assert!(serde_yaml::from_str::<StepFile>(yaml).is_err());
    }

    #[test]
    fn unknown_kind_still_parses() {
        let yaml = "steps:\n  - {name: a, type: http}\n";
        let file: StepFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.steps[0].kind, "http");
    }
}
