use markup_desk::app::ControlId;
use markup_desk::markup::MarkupType;
use markup_desk::ui::{DataButton, ToolbarButton};
use markup_desk::viewer::InMemoryViewer;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let mut app = markup_desk::run(|config| InMemoryViewer::new(config.viewer.clone()))?;
    app.viewer().borrow_mut().finish_loading();

    app.dispatch(ControlId::Toolbar(ToolbarButton::Tool(MarkupType::Arrow)))?;
    let placed = app
        .viewer()
        .borrow_mut()
        .place_markup(json!({"points": [[0.0, 0.0], [120.0, 45.0]], "lineWidth": 2}));
    if let Some(id) = placed {
        app.viewer().borrow_mut().click(&id);
    }

    app.dispatch(ControlId::Toolbar(ToolbarButton::Manage))?;
    app.dispatch(ControlId::Data(DataButton::Get))?;
    println!("{}", app.panel().text());
    Ok(())
}
