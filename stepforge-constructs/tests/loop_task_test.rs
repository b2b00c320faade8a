use serde_json::json;
use stepforge_constructs::{
    loop_docker_image_task, loop_task, CatchProps, DockerFunctionSpec, Fragment, FunctionRef,
    LoopTaskProps,
};
use stepforge_dsl::{Condition, JsonPath, State};

fn functions() -> (FunctionRef, FunctionRef) {
    (FunctionRef::new("deploy-stack"), FunctionRef::new("check-stack"))
}

fn build() -> Fragment {
    let (execute, verify) = functions();
    loop_task("Deploy", &execute, &verify, LoopTaskProps::default()).unwrap()
}

#[test]
fn test_entry_exit_and_catch_targets() {
    let fragment = build();
    assert_eq!(fragment.start_at(), "Deploy-Execute");
    // the fail path is a sink, not a chaining exit
    assert_eq!(fragment.exits(), ["Deploy-Succeeded"]);
    assert_eq!(fragment.catch_targets(), ["Deploy-Execute", "Deploy-Verify"]);
}

#[test]
fn test_execute_wait_verify_wiring() {
    let fragment = build();

    let execute = match &fragment.states()["Deploy-Execute"] {
        State::Task(task) => task,
        other => panic!("expected Task, got {:?}", other),
    };
    assert_eq!(execute.resource, "deploy-stack");
    // the execute result is noise; the verify step owns the verdict
    assert_eq!(execute.base.result_path, Some(JsonPath::Discard));
    assert_eq!(execute.base.next.as_deref(), Some("Deploy-Wait"));

    let wait = match &fragment.states()["Deploy-Wait"] {
        State::Wait(wait) => wait,
        other => panic!("expected Wait, got {:?}", other),
    };
    assert_eq!(wait.seconds, Some(10));
    assert_eq!(wait.base.next.as_deref(), Some("Deploy-Verify"));

    let verify = match &fragment.states()["Deploy-Verify"] {
        State::Task(task) => task,
        other => panic!("expected Task, got {:?}", other),
    };
    assert_eq!(verify.resource, "check-stack");
    assert_eq!(verify.base.result_path, Some(JsonPath::path("$.VerifyResult")));
    assert_eq!(verify.base.next.as_deref(), Some("Deploy-CheckStatus"));
}

#[test]
fn test_three_way_branch_on_verify_status() {
    let fragment = build();
    let choice = match &fragment.states()["Deploy-CheckStatus"] {
        State::Choice(choice) => choice,
        other => panic!("expected Choice, got {:?}", other),
    };
    assert_eq!(
        choice.choices[0].condition,
        Condition::string_equals("$.VerifyResult.Status", "SUCCEEDED")
    );
    assert_eq!(choice.choices[0].next, "Deploy-Succeeded");
    assert_eq!(
        choice.choices[1].condition,
        Condition::string_equals("$.VerifyResult.Status", "FAILED")
    );
    assert_eq!(choice.choices[1].next, "Deploy-Failed");
    // anything else re-enters the wait-verify loop
    assert_eq!(choice.default.as_deref(), Some("Deploy-Wait"));

    assert!(matches!(fragment.states()["Deploy-Succeeded"], State::Pass(_)));
    assert!(matches!(fragment.states()["Deploy-Failed"], State::Fail(_)));
}

#[test]
fn test_custom_verify_path_and_wait() {
    let (execute, verify) = functions();
    let fragment = loop_task(
        "Deploy",
        &execute,
        &verify,
        LoopTaskProps {
            function_payload: Some(json!({ "StackName.$": "$.StackName" })),
            wait_seconds: 30,
            verify_path: "$.Check".to_string(),
            verify_status_field: "State".to_string(),
            ..Default::default()
        },
    )
    .unwrap();

    let wait = match &fragment.states()["Deploy-Wait"] {
        State::Wait(wait) => wait,
        other => panic!("expected Wait, got {:?}", other),
    };
    assert_eq!(wait.seconds, Some(30));

    let choice = match &fragment.states()["Deploy-CheckStatus"] {
        State::Choice(choice) => choice,
        other => panic!("expected Choice, got {:?}", other),
    };
    assert_eq!(
        choice.choices[0].condition,
        Condition::string_equals("$.Check.State", "SUCCEEDED")
    );

    let execute = match &fragment.states()["Deploy-Execute"] {
        State::Task(task) => task,
        other => panic!("expected Task, got {:?}", other),
    };
    assert_eq!(execute.parameters, Some(json!({ "StackName.$": "$.StackName" })));
}

#[test]
fn test_add_catch_forwards_to_both_invocations() {
    let handler = Fragment::state("NotifyFailure", State::Pass(Default::default()));
    let fragment = build()
        .add_catch(
            handler,
            CatchProps {
                errors: vec!["States.Timeout".to_string()],
                result_path: Some(JsonPath::path("$.Error")),
            },
        )
        .unwrap();

    for target in ["Deploy-Execute", "Deploy-Verify"] {
        let catch = fragment.states()[target].base().catch.as_ref().unwrap();
        assert_eq!(catch.len(), 1);
        assert_eq!(catch[0].error_equals, ["States.Timeout"]);
        assert_eq!(catch[0].next, "NotifyFailure");
        assert_eq!(catch[0].result_path, Some(JsonPath::path("$.Error")));
    }
    // wait/choice/pass/fail stay untouched
    assert!(fragment.states()["Deploy-Wait"].base().catch.is_none());
    assert!(fragment.states()["Deploy-CheckStatus"].base().catch.is_none());
}

#[test]
fn test_loop_renders_to_a_valid_definition() {
    let definition = build().into_definition(None).unwrap();
    assert!(definition.validate().is_ok());
    // the succeeded pass state was the open exit and is now terminal
    assert_eq!(definition.states["Deploy-Succeeded"].base().end, Some(true));
}

#[test]
fn test_docker_loop_invokes_aliases_with_rollover_retry() {
    let execute = DockerFunctionSpec::new("deploy-stack", "registry.example.com/deploy:7");
    let verify = DockerFunctionSpec::new("check-stack", "registry.example.com/check:7");
    let fragment =
        loop_docker_image_task("Deploy", &execute, &verify, LoopTaskProps::default()).unwrap();

    for (name, resource) in [
        ("Deploy-Execute", "deploy-stack:live"),
        ("Deploy-Verify", "check-stack:live"),
    ] {
        let task = match &fragment.states()[name] {
            State::Task(task) => task,
            other => panic!("expected Task, got {:?}", other),
        };
        assert_eq!(task.resource, resource);
        let retry = task.base.retry.as_ref().unwrap();
        assert_eq!(retry.len(), 2);
        assert_eq!(retry[1].error_equals, vec!["ServiceUnavailableException"]);
    }
}
