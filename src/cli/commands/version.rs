//! Version command implementation.

use rich_rust::Text;
use rich_rust::prelude::*;
use serde::Serialize;

use crate::cli::VersionArgs;
use crate::output::{OutputContext, OutputMode};

#[derive(Serialize)]
struct VersionOutput<'a> {
    name: &'a str,
    version: &'a str,
    build: &'a str,
}

/// Execute the version command.
pub fn execute(args: &VersionArgs, ctx: &OutputContext) {
    let version = env!("CARGO_PKG_VERSION");

    if args.short {
        println!("{version}");
        return;
    }

    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    match ctx.mode() {
        OutputMode::Json => ctx.json(&VersionOutput {
            name: "triage",
            version,
            build,
        }),
        OutputMode::Rich => {
            let mut content = Text::new("");
            content.append_styled(&format!("triage {version}"), Style::new().bold());
            content.append_styled(&format!(" ({build})"), Style::new().dim());
            Console::default().print_renderable(&content);
        }
        OutputMode::Plain => println!("triage version {version} ({build})"),
    }
}
