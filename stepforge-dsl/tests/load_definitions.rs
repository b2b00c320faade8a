use stepforge_dsl::{JsonPath, State, StateMachineDefinition};

fn load_json(content: &str) -> StateMachineDefinition {
    serde_json::from_str(content).expect("failed to parse json definition")
}

fn load_yaml(content: &str) -> StateMachineDefinition {
    serde_yaml::from_str(content).expect("failed to parse yaml definition")
}

const WAIT_AND_INVOKE_JSON: &str = r#"{
  "Comment": "invoke after a data-driven delay",
  "StartAt": "HoldOff",
  "States": {
    "HoldOff": {
      "Type": "Wait",
      "SecondsPath": "$.WaitSeconds",
      "Next": "Invoke"
    },
    "Invoke": {
      "Type": "Task",
      "Resource": "order-processor",
      "ResultPath": null,
      "Retry": [
        {
          "ErrorEquals": ["Lambda.TooManyRequestsException"],
          "IntervalSeconds": 2,
          "BackoffRate": 2.0,
          "MaxAttempts": 6
        }
      ],
      "End": true
    }
  }
}"#;

const WAIT_AND_INVOKE_YAML: &str = r#"
Comment: invoke after a data-driven delay
StartAt: HoldOff
States:
  HoldOff:
    Type: Wait
    SecondsPath: $.WaitSeconds
    Next: Invoke
  Invoke:
    Type: Task
    Resource: order-processor
    ResultPath: null
    Retry:
      - ErrorEquals: [Lambda.TooManyRequestsException]
        IntervalSeconds: 2
        BackoffRate: 2.0
        MaxAttempts: 6
    End: true
"#;

#[test]
fn test_json_and_yaml_agree() {
    let json = load_json(WAIT_AND_INVOKE_JSON);
    let yaml = load_yaml(WAIT_AND_INVOKE_YAML);
    assert_eq!(json, yaml);
    assert_eq!(json.start_at, "HoldOff");
    assert!(json.validate().is_ok());
}

#[test]
fn test_loaded_definition_fields() {
    let definition = load_json(WAIT_AND_INVOKE_JSON);

    let (state, base) = definition.get_state_and_base("HoldOff").unwrap();
    match state {
        State::Wait(wait) => assert_eq!(wait.seconds_path.as_deref(), Some("$.WaitSeconds")),
        other => panic!("expected Wait, got {:?}", other),
    }
    assert_eq!(base.next.as_deref(), Some("Invoke"));

    let (state, base) = definition.get_state_and_base("Invoke").unwrap();
    match state {
        State::Task(task) => assert_eq!(task.resource, "order-processor"),
        other => panic!("expected Task, got {:?}", other),
    }
    // present-but-null selector must survive as DISCARD, not vanish
    assert_eq!(base.result_path, Some(JsonPath::Discard));
    let retry = base.retry.as_ref().unwrap();
    assert_eq!(retry[0].max_attempts, Some(6));
}

#[test]
fn test_rendered_json_roundtrip() {
    let definition = load_json(WAIT_AND_INVOKE_JSON);
    let rendered = definition.to_json_pretty().unwrap();
    let reloaded = load_json(&rendered);
    assert_eq!(definition, reloaded);
}
