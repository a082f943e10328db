use std::path::PathBuf;
use std::rc::Rc;

use markup_desk::app::{App, ControlId, LoadState};
use markup_desk::config::AppConfig;
use markup_desk::markup::{encode, BatchError, CodecError, ExecutorError, MarkupId, MarkupRecord, MarkupType};
use markup_desk::notification::RecordingNotifier;
use markup_desk::ui::{DataButton, ToolbarButton};
use markup_desk::viewer::{
    viewer_handle, InMemoryViewer, MarkupViewer, ModelDescriptor, ViewerCall, ViewerHandle,
};
use markup_desk::AppError;
use serde_json::json;

struct Session {
    viewer: ViewerHandle<InMemoryViewer>,
    notifier: RecordingNotifier,
    app: App<InMemoryViewer>,
}

fn session_with(viewer: InMemoryViewer, config: AppConfig) -> Session {
    let viewer = viewer_handle(viewer);
    let notifier = RecordingNotifier::new();
    let app = App::new(viewer.clone(), config, Rc::new(notifier.clone()));
    Session {
        viewer,
        notifier,
        app,
    }
}

fn session(markups: Vec<MarkupRecord>) -> Session {
    session_with(
        InMemoryViewer::default().with_markups(markups),
        AppConfig::default(),
    )
}

fn data(button: DataButton) -> ControlId {
    ControlId::Data(button)
}

fn tool(markup_type: MarkupType) -> ControlId {
    ControlId::Toolbar(ToolbarButton::Tool(markup_type))
}

#[test]
fn invalid_json_is_reported_without_touching_viewer() {
    let mut s = session(vec![MarkupRecord::new(1, MarkupType::Dot)]);
    s.app.set_panel_text("{not valid json");

    for button in [DataButton::Set, DataButton::Update, DataButton::Remove] {
        let err = s.app.dispatch(data(button)).expect_err("parse must fail");
        assert!(matches!(err, AppError::Codec(CodecError::Parse(_))));
    }

    assert!(s.viewer.borrow().calls().is_empty());
    assert_eq!(s.viewer.borrow().markups().len(), 1);
    assert_eq!(s.notifier.messages().len(), 3);
    assert!(s
        .app
        .panel()
        .last_status()
        .is_some_and(|line| line.starts_with("warning: markup data is not valid JSON")));
}

#[test]
fn remove_reports_mixed_outcomes_in_order() {
    let mut s = session(vec![
        MarkupRecord::new(1, MarkupType::Arrow),
        MarkupRecord::new(2, MarkupType::Rect),
    ]);
    s.viewer.borrow_mut().lock(2);
    s.app.set_panel_text(r#"[{"id":1},{"id":2}]"#);

    s.app.dispatch(data(DataButton::Remove)).expect("remove batch");

    assert_eq!(
        s.app.panel().status_log(),
        &[
            "Removed markup with id: 1".to_string(),
            "Failed to remove markup with id: 2".to_string()
        ]
    );
    let remaining = s
        .viewer
        .borrow()
        .markups()
        .iter()
        .filter_map(MarkupRecord::id)
        .collect::<Vec<_>>();
    assert_eq!(remaining, vec![MarkupId::from(2)]);
    assert!(s.notifier.messages().is_empty());
}

#[test]
fn update_issues_one_call_and_one_line_per_item() {
    let mut s = session(vec![
        MarkupRecord::new("a", MarkupType::CloudRectWithText).with_field("text", json!("old")),
        MarkupRecord::new("b", MarkupType::Circle),
    ]);
    s.app.set_panel_text(
        r#"[
{"id":"a","text":"new"},
{"id":"missing","text":"x"},
{"id":"b","type":"RectMarkup"},
{"id":"a","text":"newer"}
]"#,
    );

    s.app.dispatch(data(DataButton::Update)).expect("update batch");

    let calls = s.viewer.borrow().calls().to_vec();
    assert_eq!(calls.len(), 4);
    assert!(calls
        .iter()
        .all(|call| matches!(call, ViewerCall::UpdateMarkup { .. })));
    assert_eq!(
        s.app.panel().status_log(),
        &[
            "Updated markup with id: a".to_string(),
            "Failed to update markup with id: missing".to_string(),
            "Failed to update markup with id: b".to_string(),
            "Updated markup with id: a".to_string(),
        ]
    );
    assert_eq!(
        s.viewer.borrow().markups()[0].get("text"),
        Some(&json!("newer"))
    );
}

#[test]
fn get_then_set_restores_cleared_collection() {
    let drawn = vec![
        MarkupRecord::new(1, MarkupType::Arrow).with_field("points", json!([[0, 0], [4, 2]])),
        MarkupRecord::new(2, MarkupType::CloudRectWithText)
            .with_field("text", json!("see detail \"A\"")),
    ];
    let mut s = session(drawn.clone());

    s.app.dispatch(data(DataButton::Get)).expect("get");
    assert_eq!(s.app.panel().text(), encode(&drawn).expect("encode"));

    s.app
        .dispatch(ControlId::Toolbar(ToolbarButton::Clear))
        .expect("clear");
    assert!(s.viewer.borrow().markups().is_empty());

    s.app.dispatch(data(DataButton::Set)).expect("set");
    assert_eq!(s.viewer.borrow().markups(), drawn);
}

#[test]
fn set_with_empty_array_clears_collection() {
    let mut s = session(vec![MarkupRecord::new(5, MarkupType::Dot)]);
    s.app.set_panel_text("[\n]");

    s.app.dispatch(data(DataButton::Set)).expect("set empty");

    assert!(s.viewer.borrow().markups().is_empty());
    assert_eq!(
        s.viewer.borrow().calls(),
        &[ViewerCall::SetMarkups { count: 0 }]
    );
}

#[test]
fn set_rejects_malformed_batch_before_any_viewer_call() {
    let mut s = session(vec![MarkupRecord::new(5, MarkupType::Dot)]);
    s.app.set_panel_text(
        r#"[{"id":1,"type":"DotMarkup"},{"id":1,"type":"RectMarkup"}]"#,
    );

    let err = s.app.dispatch(data(DataButton::Set)).expect_err("duplicate ids");

    assert!(matches!(
        err,
        AppError::Executor(ExecutorError::MalformedBatch(BatchError::DuplicateId { .. }))
    ));
    assert!(s.viewer.borrow().calls().is_empty());
    assert_eq!(
        s.viewer.borrow().markups(),
        vec![MarkupRecord::new(5, MarkupType::Dot)]
    );
    assert_eq!(s.notifier.messages().len(), 1);
}

#[test]
fn non_array_document_is_rejected() {
    let mut s = session(Vec::new());
    s.app.set_panel_text(r#"{"id": 1}"#);

    let err = s.app.dispatch(data(DataButton::Remove)).expect_err("object");

    assert!(matches!(err, AppError::Codec(CodecError::NotAnArray { .. })));
    assert!(s.viewer.borrow().calls().is_empty());
}

#[test]
fn reselecting_a_tool_returns_to_idle() {
    let mut s = session(Vec::new());

    s.app.dispatch_identifier("ArrowMarkup").expect("arrow on");
    assert!(s
        .app
        .toolbar()
        .is_active(ToolbarButton::Tool(MarkupType::Arrow)));
    s.app.dispatch_identifier("ArrowMarkup").expect("arrow off");

    assert_eq!(s.viewer.borrow().active_markup_type(), None);
    assert!(s.app.toolbar().active_tools().is_empty());
    assert_eq!(
        s.viewer.borrow().calls(),
        &[
            ViewerCall::Activate(MarkupType::Arrow),
            ViewerCall::Deactivate(MarkupType::Arrow)
        ]
    );
}

#[test]
fn switching_tools_deactivates_the_previous_one_first() {
    let mut s = session(Vec::new());

    for markup_type in MarkupType::ALL {
        s.app.dispatch(tool(markup_type)).expect("switch tool");
        assert_eq!(s.app.toolbar().active_tools(), vec![markup_type]);
        assert_eq!(s.app.tools().active_tool(), Some(markup_type));
    }

    let calls = s.viewer.borrow().calls().to_vec();
    assert_eq!(calls.len(), 1 + 2 * (MarkupType::ALL.len() - 1));
    assert_eq!(
        &calls[1..3],
        &[
            ViewerCall::Deactivate(MarkupType::Arrow),
            ViewerCall::Activate(MarkupType::CloudRectWithText)
        ]
    );
}

#[test]
fn clear_keeps_tool_state_and_manage_stays_off_the_viewer() {
    let mut s = session(vec![MarkupRecord::new(1, MarkupType::Rect)]);
    s.app.dispatch(tool(MarkupType::Rect)).expect("rect");
    s.viewer.borrow_mut().take_calls();

    s.app
        .dispatch(ControlId::Toolbar(ToolbarButton::Clear))
        .expect("clear");
    assert_eq!(s.viewer.borrow().calls(), &[ViewerCall::ClearMarkups]);
    assert_eq!(s.app.tools().active_tool(), Some(MarkupType::Rect));
    assert!(s.app.toolbar().is_active(ToolbarButton::Tool(MarkupType::Rect)));

    s.viewer.borrow_mut().take_calls();
    s.app.dispatch_identifier("ManageMarkups").expect("show panel");
    assert!(s.app.panel().is_visible());
    assert!(s.app.toolbar().is_active(ToolbarButton::Manage));
    s.app.dispatch_identifier("ManageMarkups").expect("hide panel");
    assert!(!s.app.panel().is_visible());
    assert!(!s.app.toolbar().is_active(ToolbarButton::Manage));
    assert!(s.viewer.borrow().calls().is_empty());
    assert_eq!(s.app.tools().active_tool(), Some(MarkupType::Rect));
}

#[test]
fn unknown_control_is_reported_not_fatal() {
    let mut s = session(Vec::new());

    let err = s
        .app
        .dispatch_identifier("PolylineMarkup")
        .expect_err("unknown control");

    assert!(matches!(err, AppError::UnknownControl { .. }));
    assert_eq!(s.notifier.messages(), vec!["unknown control: PolylineMarkup"]);
}

#[test]
fn start_prepares_viewer_and_loads_model_in_background() {
    let mut s = session(Vec::new());

    s.app.start().expect("start");

    assert_eq!(s.app.load_state(), LoadState::Loading);
    {
        let viewer = s.viewer.borrow();
        assert_eq!(viewer.axis_gizmo(), Some(true));
        assert_eq!(viewer.fonts().len(), 2);
        assert_eq!(viewer.listener_count(), 1);
        assert_eq!(viewer.active_markup_type(), None);
    }

    s.viewer.borrow_mut().activate_markup(MarkupType::Dot);
    assert_eq!(s.viewer.borrow_mut().place_markup(json!({})), None);

    assert!(s.viewer.borrow_mut().finish_loading());
    assert_eq!(s.app.load_state(), LoadState::Loaded);
    let placed = s
        .viewer
        .borrow_mut()
        .place_markup(json!({"position": [3, 4]}))
        .expect("drawing works after load");
    s.viewer.borrow_mut().click(&placed);

    assert!(matches!(s.app.start(), Err(AppError::AlreadyStarted)));
}

#[test]
fn font_failure_is_warned_and_model_still_loads() {
    let config = AppConfig {
        font_files: vec![PathBuf::from("fonts/simplex.shx"), PathBuf::from("logo.png")],
        ..AppConfig::default()
    };
    let mut s = session_with(InMemoryViewer::default(), config);

    s.app.start().expect("start survives font failure");

    assert_eq!(s.notifier.messages().len(), 1);
    assert!(s.notifier.messages()[0].contains("logo.png"));
    assert!(s.viewer.borrow().is_loading());
}

#[test]
fn model_load_failure_is_surfaced() {
    let config = AppConfig {
        model: ModelDescriptor {
            src: String::new(),
            ..ModelDescriptor::default()
        },
        ..AppConfig::default()
    };
    let mut s = session_with(InMemoryViewer::default(), config);

    s.app.start().expect("start");

    assert!(matches!(s.app.load_state(), LoadState::Failed(_)));
    assert_eq!(s.notifier.messages().len(), 1);
}

#[test]
fn drawn_markups_show_up_in_get_output() {
    let mut s = session(Vec::new());
    s.app.start().expect("start");
    s.viewer.borrow_mut().finish_loading();

    s.app.dispatch(tool(MarkupType::Circle)).expect("circle");
    s.viewer
        .borrow_mut()
        .place_markup(json!({"center": [1.5, 2.5], "radius": 3}))
        .expect("placed");
    s.app.dispatch(data(DataButton::Get)).expect("get");

    assert_eq!(
        s.app.panel().text(),
        "[\n{\"id\":1,\"type\":\"CircleMarkup\",\"center\":[1.5,2.5],\"radius\":3}\n]"
    );
}

#[test]
fn configured_viewer_settings_reach_the_viewer() {
    let config = markup_desk::config::parse_app_config(
        r#"{"viewer": {"containerId": "planCanvas", "enableLayoutBar": false}}"#,
    )
    .expect("config parses");
    let s = session_with(InMemoryViewer::new(config.viewer.clone()), config);

    let viewer = s.viewer.borrow();
    assert_eq!(viewer.settings().container_id, "planCanvas");
    assert!(!viewer.settings().enable_layout_bar);
    assert!(viewer.settings().enable_spinner);
    assert_eq!(viewer.settings(), &s.app.config().viewer);
}

#[test]
fn integral_float_ids_address_integer_markups() {
    let mut s = session(vec![
        MarkupRecord::new(1, MarkupType::Arrow),
        MarkupRecord::new(2, MarkupType::Dot),
    ]);
    s.app.set_panel_text(r#"[{"id":1.0},{"id":2.5}]"#);

    s.app.dispatch(data(DataButton::Remove)).expect("remove batch");

    assert_eq!(
        s.app.panel().status_log(),
        &[
            "Removed markup with id: 1".to_string(),
            "Failed to remove markup with id: 2.5".to_string()
        ]
    );
    assert_eq!(
        s.viewer.borrow().markups(),
        vec![MarkupRecord::new(2, MarkupType::Dot)]
    );
}
