//! Monitors command implementation

use crate::cli::output::{format_monitor_detail, format_monitors_json};
use crate::cli::{
    MonitorsAddArgs, MonitorsEditArgs, MonitorsListArgs, MonitorsRemoveArgs, MonitorsShowArgs,
};
use crate::client::MonitorApi;
use crate::dashboard::{
    ControllerSettings, DashboardController, EditPreset, LinePrompter, MutationOutcome,
    NonInteractive, Prompter, TableView, TerminalRenderer,
};
use crate::monitor::{MonitorForm, MonitorId};
use std::io::BufReader;

type Rendered = TerminalRenderer<Vec<u8>>;

fn rendered_text(renderer: Rendered) -> String {
    String::from_utf8_lossy(&renderer.into_inner()).to_string()
}

/// Turn a mutation outcome into command output or an error
fn finish(
    outcome: MutationOutcome,
    applied: &str,
    declined: &str,
    rendered: String,
) -> Result<String, Box<dyn std::error::Error>> {
    match outcome {
        MutationOutcome::Applied => Ok(format!("✓ {}\n{}", applied, rendered.trim_end())),
        MutationOutcome::Declined => Ok(declined.to_string()),
        MutationOutcome::Abandoned(e) => Err(format!("Edit abandoned: {}", e).into()),
        MutationOutcome::Rejected(e) => Err(format!("Invalid monitor: {}", e).into()),
        MutationOutcome::Failed(e) => Err(e.into()),
    }
}

/// Handle monitors list command
pub async fn handle_monitors_list(
    args: &MonitorsListArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let (_, api) = args.connection.connect()?;

    if args.json {
        let monitors = api.list_monitors().await?;
        return Ok(format_monitors_json(&monitors)?);
    }

    let controller =
        DashboardController::new(api, TerminalRenderer::new(Vec::new()), NonInteractive);
    let table = controller.refresh_monitors().await;
    if table == TableView::Unavailable {
        return Err(TableView::Unavailable
            .placeholder()
            .unwrap_or("Unable to load monitors")
            .into());
    }

    Ok(rendered_text(controller.into_target()).trim_end().to_string())
}

/// Handle monitors show command
pub async fn handle_monitors_show(
    args: &MonitorsShowArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let (_, api) = args.connection.connect()?;
    let monitor = api.get_monitor(&MonitorId::from(args.id.as_str())).await?;

    if args.json {
        Ok(serde_json::to_string_pretty(&monitor)?)
    } else {
        Ok(format_monitor_detail(&monitor).trim_end().to_string())
    }
}

/// Handle monitors add command
pub async fn handle_monitors_add(
    args: &MonitorsAddArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let (_, api) = args.connection.connect()?;
    let controller =
        DashboardController::new(api, TerminalRenderer::new(Vec::new()), NonInteractive);

    let form = MonitorForm::new(args.name.clone(), args.url.clone(), args.interval.clone());
    let outcome = controller.create_monitor(&form).await;

    finish(
        outcome,
        &format!("Monitor '{}' created", args.name),
        "",
        rendered_text(controller.into_target()),
    )
}

/// Handle monitors edit command
///
/// Values not given as flags are prompted for on stdin.
pub async fn handle_monitors_edit(
    args: &MonitorsEditArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let prompter = LinePrompter::new(BufReader::new(std::io::stdin()), std::io::stderr())
        .with_preset(EditPreset {
            name: args.name.clone(),
            url: args.url.clone(),
            interval_seconds: args.interval.clone(),
        });
    run_edit(args, prompter).await
}

async fn run_edit<P: Prompter>(
    args: &MonitorsEditArgs,
    prompter: P,
) -> Result<String, Box<dyn std::error::Error>> {
    let (config, api) = args.connection.connect()?;
    let controller = DashboardController::new(api, TerminalRenderer::new(Vec::new()), prompter)
        .with_settings(ControllerSettings::from(&config));

    let id = MonitorId::from(args.id.as_str());
    let outcome = controller.edit_monitor(&id).await;

    finish(
        outcome,
        &format!("Monitor {} updated", id),
        "Edit cancelled",
        rendered_text(controller.into_target()),
    )
}

/// Handle monitors remove command
pub async fn handle_monitors_remove(
    args: &MonitorsRemoveArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let prompter = LinePrompter::new(BufReader::new(std::io::stdin()), std::io::stderr())
        .assume_yes(args.yes);
    run_remove(args, prompter).await
}

async fn run_remove<P: Prompter>(
    args: &MonitorsRemoveArgs,
    prompter: P,
) -> Result<String, Box<dyn std::error::Error>> {
    let (_, api) = args.connection.connect()?;
    let controller = DashboardController::new(api, TerminalRenderer::new(Vec::new()), prompter);

    let id = MonitorId::from(args.id.as_str());
    let outcome = controller.delete_monitor(&id).await;

    finish(
        outcome,
        &format!("Monitor {} deleted", id),
        "Nothing deleted",
        rendered_text(controller.into_target()),
    )
}
