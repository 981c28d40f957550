use std::process::ExitCode;

use clap::Parser;

use term_toolkit::components::{Button, Label};
use term_toolkit::config::{Args, WmConfig};
use term_toolkit::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_toolkit::drivers::{InputDriver, OutputDriver};
use term_toolkit::event_loop::{ControlFlow, EventLoop};
use term_toolkit::screen::Screen;
use term_toolkit::tracing_sub;
use term_toolkit::widget::{Orientation, WidgetId, WidgetTree};
use term_toolkit::wm::{Workspace, WindowManager};

fn main() -> ExitCode {
    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = tracing_sub::init_default(config.log_path.as_deref()) {
        eprintln!("cannot open log file: {err}");
        return ExitCode::FAILURE;
    }
    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "terminated");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: WmConfig) -> term_toolkit::Result<()> {
    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let screen = Screen::from_output(Box::new(output))?;
    let poll_interval = config.poll_interval;
    let mut wm = WindowManager::from_config(screen, config);
    if wm.core().workspaces().len() < 2 {
        wm.add_workspace(Workspace::new(Some("scratch")));
    }

    let main = main_window(wm.tree_mut());
    wm.show(main);
    let about = about_window(wm.tree_mut());
    wm.show(about);

    let mut input = ConsoleInputDriver::new();
    input.set_mouse_capture(true)?;
    let mut pump = EventLoop::new(input, poll_interval);
    let mut failure = None;
    pump.run(|_, event| {
        if let Some(event) = event {
            wm.handle_event(&event);
        } else if let Err(err) = wm.tick() {
            failure = Some(err);
            return Ok(ControlFlow::Quit);
        }
        if wm.should_quit() {
            return Ok(ControlFlow::Quit);
        }
        Ok(ControlFlow::Continue)
    })?;
    pump.driver().set_mouse_capture(false)?;
    wm.tree_mut().screen_mut().output_mut().exit()?;
    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main_window(tree: &mut WidgetTree) -> WidgetId {
    let win = tree.new_window("term-toolkit");
    tree.set_name(win, "MainWindow");
    let help = tree.add_widget(Label::new(
        "tab: next widget   alt-n/alt-p: next/previous window\n\
         alt->/alt-<: switch workspace   alt-c: close   ctrl-q: quit",
    ));
    tree.add(win, help);
    win
}

fn about_window(tree: &mut WidgetTree) -> WidgetId {
    let win = tree.new_window("About");
    let text = tree.add_widget(Label::new("A widget toolkit for terminals."));
    let row = tree.new_box(false, Orientation::Horizontal);
    let ok = tree.add_widget(Button::new("OK").on_activate(|| tracing::info!("ok pressed")));
    let more = tree.add_widget(Button::new("More"));
    tree.add(row, ok);
    tree.add(row, more);
    tree.add(win, text);
    tree.add(win, row);
    win
}

