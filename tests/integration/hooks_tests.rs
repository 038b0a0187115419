//! Integration tests for guarded action dispatch

use action_hooks::hooks::{BeforeCallback, Controller, HookPhase};
use action_hooks::HookError;
use anyhow::Result;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use crate::common::{entries, init_tracing, shared_log, ArticleController, Forbidden};

#[test]
fn test_before_hook_and_uppercasing_after_hook() -> Result<()> {
    init_tracing();
    let log = shared_log();
    let mut controller = ArticleController::new(log.clone());

    let before_log = log.clone();
    controller
        .hooks_mut()
        .before_calling(["save"], move |_| {
            before_log.lock().unwrap().push("before".into());
            Ok(())
        })
        .after_calling(["save"], |result, _| {
            Ok(json!(result.as_str().unwrap_or_default().to_uppercase()))
        });

    let result = controller.call_action("save", vec![])?;

    assert_eq!(result, json!("OK"));
    assert_eq!(entries(&log), vec!["before", "save"]);
    Ok(())
}

#[test]
fn test_unhooked_action_matches_direct_call() -> Result<()> {
    let mut controller = ArticleController::new(shared_log());

    let result = controller.call_action("show", vec![json!(7)])?;

    assert_eq!(result, json!({ "id": 7 }));
    assert_eq!(controller.received, vec![vec![json!(7)]]);
    Ok(())
}

#[test]
fn test_before_hooks_run_in_registration_order_with_same_params() -> Result<()> {
    let seen: Arc<Mutex<Vec<(String, Vec<Value>)>>> = Arc::new(Mutex::new(Vec::new()));
    let mut controller = ArticleController::new(shared_log());

    for name in ["b1", "b2"] {
        let seen = seen.clone();
        controller.hooks_mut().before_calling(["show"], move |params| {
            seen.lock().unwrap().push((name.to_string(), params.to_vec()));
            Ok(())
        });
    }

    controller.call_action("show", vec![json!("a"), json!(2)])?;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, "b1");
    assert_eq!(seen[1].0, "b2");
    assert_eq!(seen[0].1, seen[1].1);
    assert_eq!(seen[0].1, vec![json!("a"), json!(2)]);
    Ok(())
}

#[test]
fn test_after_hooks_chain_results() -> Result<()> {
    let firsts = Arc::new(Mutex::new(Vec::new()));
    let mut controller = ArticleController::new(shared_log());

    let a1_saw = firsts.clone();
    let a2_saw = firsts.clone();
    controller
        .hooks_mut()
        .after_calling(["save"], move |result, _| {
            a1_saw.lock().unwrap().push(result.clone());
            Ok(json!(format!("{}-a1", result.as_str().unwrap_or_default())))
        })
        .after_calling(["save"], move |result, _| {
            a2_saw.lock().unwrap().push(result.clone());
            Ok(json!(format!("{}-a2", result.as_str().unwrap_or_default())))
        });

    let result = controller.call_action("save", vec![])?;

    assert_eq!(result, json!("ok-a1-a2"));
    assert_eq!(*firsts.lock().unwrap(), vec![json!("ok"), json!("ok-a1")]);
    Ok(())
}

#[test]
fn test_after_hooks_receive_extended_params() -> Result<()> {
    let rest = Arc::new(Mutex::new(Vec::new()));
    let mut controller = ArticleController::new(shared_log()).preparing();

    let sink = rest.clone();
    controller.hooks_mut().after_calling(["show"], move |result, params| {
        sink.lock().unwrap().extend(params.iter().cloned());
        Ok(result)
    });

    let result = controller.call_action("show", vec![json!(3)])?;

    assert_eq!(result, json!({ "id": 3 }));
    assert_eq!(*rest.lock().unwrap(), vec![json!(3), json!("show")]);
    // The action itself never sees the appended name
    assert_eq!(controller.received, vec![vec![json!(3)]]);
    Ok(())
}

#[test]
fn test_missing_method_reports_owner_and_name() {
    let mut controller = ArticleController::new(shared_log());

    let err = controller.call_action("publish", vec![]).unwrap_err();

    match err {
        HookError::MethodNotFound { owner, method } => {
            assert_eq!(owner, "ArticleController");
            assert_eq!(method, "publish");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_preparation_runs_once_even_for_missing_method() {
    let log = shared_log();
    let mut controller = ArticleController::new(log.clone()).preparing();

    let err = controller.call_action("publish", vec![]).unwrap_err();

    assert!(err.is_method_not_found());
    assert_eq!(entries(&log), vec!["use_hooks"]);
}

#[test]
fn test_preparation_runs_once_per_call() -> Result<()> {
    let log = shared_log();
    let mut controller = ArticleController::new(log.clone()).preparing();

    controller.call_action("save", vec![])?;
    controller.call_action("save", vec![])?;

    assert_eq!(entries(&log), vec!["use_hooks", "save", "use_hooks", "save"]);
    Ok(())
}

#[test]
fn test_preparation_error_aborts_dispatch() {
    let log = shared_log();
    let mut controller = ArticleController::new(log.clone()).preparing();
    controller.prepare_fails = true;

    let err = controller.call_action("save", vec![]).unwrap_err();

    assert_eq!(err.to_string(), "preparation failed");
    assert_eq!(entries(&log), vec!["use_hooks"]);
}

#[test]
fn test_before_error_aborts_remaining_steps() {
    let log = shared_log();
    let mut controller = ArticleController::new(log.clone());

    let after_log = log.clone();
    controller
        .hooks_mut()
        .before_calling(["save"], |_| Err(anyhow::Error::new(Forbidden)))
        .before_calling(["save"], {
            let log = log.clone();
            move |_| {
                log.lock().unwrap().push("second before".into());
                Ok(())
            }
        })
        .after_calling(["save"], move |result, _| {
            after_log.lock().unwrap().push("after".into());
            Ok(result)
        });

    let err = controller.call_action("save", vec![]).unwrap_err();

    assert!(err
        .as_callback()
        .and_then(|e| e.downcast_ref::<Forbidden>())
        .is_some());
    assert!(entries(&log).is_empty());
}

#[test]
fn test_action_error_propagates_unchanged() {
    let mut controller = ArticleController::new(shared_log());

    let err = controller.call_action("destroy", vec![]).unwrap_err();

    assert_eq!(err.to_string(), "forbidden");
    assert!(err
        .as_callback()
        .and_then(|e| e.downcast_ref::<Forbidden>())
        .is_some());
}

#[test]
fn test_after_error_propagates() {
    let mut controller = ArticleController::new(shared_log());
    controller
        .hooks_mut()
        .after_calling(["save"], |_, _| anyhow::bail!("render failed"));

    let err = controller.call_action("save", vec![]).unwrap_err();
    assert_eq!(err.to_string(), "render failed");
}

#[test]
fn test_empty_method_set_registers_nothing() {
    let mut controller = ArticleController::new(shared_log());
    controller
        .hooks_mut()
        .before_calling(Vec::<String>::new(), |_| Ok(()));

    assert!(controller.hooks().is_empty());
}

#[test]
fn test_hooks_for_nonexistent_method_are_accepted() {
    let mut controller = ArticleController::new(shared_log());
    controller
        .hooks_mut()
        .before_calling(["publish"], |_| Ok(()));

    assert_eq!(controller.hooks().count(HookPhase::Before, "publish"), 1);
    assert!(controller.call_action("publish", vec![]).unwrap_err().is_method_not_found());
}

#[test]
fn test_same_callback_on_several_methods_and_twice() -> Result<()> {
    let log = shared_log();
    let mut controller = ArticleController::new(log.clone());

    let counter = log.clone();
    let shared: BeforeCallback = Arc::new(move |_: &[Value]| -> anyhow::Result<()> {
        counter.lock().unwrap().push("tick".into());
        Ok(())
    });
    controller
        .hooks_mut()
        .push_before(["save", "show"], shared.clone())
        .push_before(["save"], shared);

    controller.call_action("save", vec![])?;
    controller.call_action("show", vec![json!(1)])?;

    assert_eq!(entries(&log), vec!["tick", "tick", "save", "tick"]);
    Ok(())
}

#[test]
fn test_hooks_registered_during_preparation_apply_to_same_call() -> Result<()> {
    use action_hooks::hooks::{Action, ActionHooks, ActionTable};

    struct Lazy {
        hooks: ActionHooks,
        actions: ActionTable<Lazy>,
    }

    impl Controller for Lazy {
        fn hooks(&self) -> &ActionHooks {
            &self.hooks
        }

        fn hooks_mut(&mut self) -> &mut ActionHooks {
            &mut self.hooks
        }

        fn action(&self, name: &str) -> Option<Action<Self>> {
            self.actions.get(name)
        }

        fn use_hooks(&mut self) -> Option<anyhow::Result<()>> {
            self.hooks.clear();
            self.hooks
                .after_calling(["index"], |result, params| Ok(json!([result, params])));
            Some(Ok(()))
        }
    }

    fn index(_: &mut Lazy, _: &[Value]) -> anyhow::Result<Value> {
        Ok(json!("list"))
    }

    let mut lazy = Lazy {
        hooks: ActionHooks::new(),
        actions: ActionTable::new().with("index", index),
    };

    let result = lazy.call_action("index", vec![json!(1)])?;
    assert_eq!(result, json!(["list", [1, "index"]]));
    Ok(())
}
