//! Integration tests: Run click → POST /run_algorithm → result image.
//!
//! Drives `FormController::on_run_clicked` against a recording page and a
//! scripted transport.

mod common;

use common::{FakePage, ScriptedTransport, init_logging};
use pretty_assertions::assert_eq;
use rl_core::ProtocolError;
use rl_form::{
    ControllerConfig, FormController, FormError, RunState, SELECT_ALGORITHM_NOTICE, TransportError,
};
use serde_json::json;

fn controller_with(algo: &str) -> FormController<FakePage> {
    init_logging();
    let mut ctl = FormController::new(FakePage::default());
    ctl.view_mut().select(algo);
    ctl.on_algorithm_change(algo);
    ctl
}

fn ok_reply(payload: &str) -> Result<String, TransportError> {
    Ok(json!({ "result": payload }).to_string())
}

// ─── Precondition ───────────────────────────────────────────────────────

#[tokio::test]
async fn no_selection_never_posts() {
    let mut ctl = controller_with("");
    let transport = ScriptedTransport::default();

    let err = ctl.on_run_clicked(&transport).await.unwrap_err();

    assert_eq!(err, FormError::NoAlgorithm);
    assert_eq!(transport.post_count(), 0);
    assert_eq!(ctl.view().alerts, vec![SELECT_ALGORITHM_NOTICE]);
    assert_eq!(ctl.state(), RunState::Idle);
}

// ─── Request body ───────────────────────────────────────────────────────

#[tokio::test]
async fn edited_circle_radius_is_posted() {
    let mut ctl = controller_with("bresenham_circle");
    ctl.view_mut().edit("radius", "30");
    let transport = ScriptedTransport::replying([ok_reply("iVBORw0KG")]);

    ctl.on_run_clicked(&transport).await.unwrap();

    let posts = transport.posts.borrow();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, "/run_algorithm");
    assert_eq!(
        posts[0].1,
        r#"{"algorithm":"bresenham_circle","parameters":{"xc":"25","yc":"25","radius":"30"}}"#
    );
}

#[tokio::test]
async fn one_entry_per_rendered_input() {
    let mut ctl = controller_with("dda");
    ctl.view_mut().edit("y2", "");
    let transport = ScriptedTransport::replying([ok_reply("AAAA")]);

    ctl.on_run_clicked(&transport).await.unwrap();

    assert_eq!(
        transport.last_body(),
        json!({
            "algorithm": "dda",
            "parameters": { "x1": "5", "y1": "5", "x2": "45", "y2": "" }
        })
    );
}

#[tokio::test]
async fn raw_values_are_not_validated_by_default() {
    let mut ctl = controller_with("step_by_step");
    ctl.view_mut().edit("x1", "-12.5e3");
    let transport = ScriptedTransport::replying([ok_reply("AAAA")]);

    ctl.on_run_clicked(&transport).await.unwrap();

    assert_eq!(transport.last_body()["parameters"]["x1"], "-12.5e3");
}

#[tokio::test]
async fn custom_endpoint_is_used() {
    init_logging();
    let mut ctl = FormController::with_config(
        FakePage::default(),
        ControllerConfig::with_endpoint("/lab3/run_algorithm"),
    );
    ctl.view_mut().select("bresenham_line");
    ctl.on_algorithm_change("bresenham_line");
    let transport = ScriptedTransport::replying([ok_reply("AAAA")]);

    ctl.on_run_clicked(&transport).await.unwrap();

    assert_eq!(transport.posts.borrow()[0].0, "/lab3/run_algorithm");
}

// ─── Responses ──────────────────────────────────────────────────────────

#[tokio::test]
async fn result_becomes_png_data_uri() {
    let mut ctl = controller_with("bresenham_line");
    let transport = ScriptedTransport::replying([ok_reply("iVBORw0KG")]);

    ctl.on_run_clicked(&transport).await.unwrap();

    assert_eq!(
        ctl.view().image_src.as_deref(),
        Some("data:image/png;base64,iVBORw0KG")
    );
    assert_eq!(ctl.state(), RunState::Idle);
}

#[tokio::test]
async fn network_failure_is_logged_not_shown() {
    let mut ctl = controller_with("dda");
    let transport = ScriptedTransport::replying([Err(TransportError::Network(
        "connection reset".into(),
    ))]);

    let err = ctl.on_run_clicked(&transport).await.unwrap_err();

    assert!(matches!(err, FormError::Transport(TransportError::Network(_))));
    assert!(ctl.view().alerts.is_empty());
    assert_eq!(ctl.view().image_src, None);
    assert_eq!(ctl.state(), RunState::Idle);
}

#[tokio::test]
async fn non_json_body_is_logged_not_shown() {
    let mut ctl = controller_with("dda");
    let transport = ScriptedTransport::replying([Ok("<h1>500</h1>".to_string())]);

    let err = ctl.on_run_clicked(&transport).await.unwrap_err();

    assert!(matches!(err, FormError::Protocol(ProtocolError::Json(_))));
    assert!(ctl.view().alerts.is_empty());
    assert_eq!(ctl.view().image_src, None);
}

#[tokio::test]
async fn server_error_reply_is_surfaced() {
    let mut ctl = controller_with("bresenham_circle");
    let transport =
        ScriptedTransport::replying([Ok(json!({ "error": "unknown algorithm" }).to_string())]);

    let err = ctl.on_run_clicked(&transport).await.unwrap_err();

    assert_eq!(
        err,
        FormError::Protocol(ProtocolError::Server("unknown algorithm".into()))
    );
    assert_eq!(ctl.view().alerts, vec!["Server error: unknown algorithm"]);
}

#[tokio::test]
async fn server_error_can_stay_silent() {
    init_logging();
    let config = ControllerConfig {
        surface_server_errors: false,
        ..ControllerConfig::default()
    };
    let mut ctl = FormController::with_config(FakePage::default(), config);
    ctl.view_mut().select("dda");
    ctl.on_algorithm_change("dda");
    let transport = ScriptedTransport::replying([Ok(r#"{"error":"boom"}"#.to_string())]);

    assert!(ctl.on_run_clicked(&transport).await.is_err());
    assert!(ctl.view().alerts.is_empty());
}

// ─── Overlapping submissions ────────────────────────────────────────────

#[test]
fn overlapping_runs_are_not_guarded() {
    let mut ctl = controller_with("dda");

    let first = ctl.prepare_run().unwrap();
    let second = ctl.prepare_run().unwrap();
    assert_eq!(first.body, second.body);
    assert_eq!(ctl.in_flight(), 2);
    assert_eq!(ctl.state(), RunState::AwaitingResponse);

    ctl.complete_run(ok_reply("FIRST")).unwrap();
    assert_eq!(ctl.state(), RunState::AwaitingResponse);
    ctl.complete_run(ok_reply("SECOND")).unwrap();
    assert_eq!(ctl.state(), RunState::Idle);
    assert_eq!(
        ctl.view().image_src.as_deref(),
        Some("data:image/png;base64,SECOND")
    );
}

// ─── Strict mode ────────────────────────────────────────────────────────

#[tokio::test]
async fn strict_mode_blocks_bad_radius() {
    init_logging();
    let config = ControllerConfig {
        strict_params: true,
        ..ControllerConfig::default()
    };
    let mut ctl = FormController::with_config(FakePage::default(), config);
    ctl.view_mut().select("bresenham_circle");
    ctl.on_algorithm_change("bresenham_circle");
    ctl.view_mut().edit("radius", "-4");
    let transport = ScriptedTransport::default();

    let err = ctl.on_run_clicked(&transport).await.unwrap_err();

    assert!(matches!(err, FormError::InvalidParams(_)));
    assert_eq!(transport.post_count(), 0);
    assert_eq!(ctl.view().alerts.len(), 1);
}

#[tokio::test]
async fn strict_mode_posts_clean_values_in_schema_order() {
    init_logging();
    let config = ControllerConfig {
        strict_params: true,
        ..ControllerConfig::default()
    };
    let mut ctl = FormController::with_config(FakePage::default(), config);
    ctl.view_mut().select("bresenham_circle");
    ctl.on_algorithm_change("bresenham_circle");
    ctl.view_mut().edit("xc", "10");
    let transport = ScriptedTransport::replying([ok_reply("AAAA")]);

    ctl.on_run_clicked(&transport).await.unwrap();

    assert_eq!(
        transport.posts.borrow()[0].1,
        r#"{"algorithm":"bresenham_circle","parameters":{"xc":"10","yc":"25","radius":"20"}}"#
    );
}
