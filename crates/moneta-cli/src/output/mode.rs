use crate::cli::{CategoryCommand, Commands, ReportCommand, TxnCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Dashboard { json, .. } | Commands::Export { json, .. } => *json,
        Commands::Report { command } => match command {
            ReportCommand::Trends { json, .. }
            | ReportCommand::Analysis { json, .. }
            | ReportCommand::Forecast { json }
            | ReportCommand::Compare { json, .. } => *json,
        },
        Commands::Txn { command } => match command {
            TxnCommand::Add { json, .. }
            | TxnCommand::List { json, .. }
            | TxnCommand::Remove { json, .. } => *json,
        },
        Commands::Category { command } => match command {
            CategoryCommand::List { json }
            | CategoryCommand::Add { json, .. }
            | CategoryCommand::Remove { json, .. } => *json,
        },
    };
    OutputMode::from_flag(json)
}
