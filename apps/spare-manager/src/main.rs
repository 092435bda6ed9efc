//! 运维命令行：创建、删除、启用、停用与查询组合系统。

use clap::{Parser, Subcommand};
use spare_directory::DeviceDirectory;
use spare_manager::{
    ComboError, Services, bootstrap, delete_combo, log_metrics, print_created, print_deleted,
};
use std::process::ExitCode;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Spare combo system manager",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Create the combo system for an operational/spare pair")]
    Create {
        operational: String,
        spare: String,
        database: String,
    },
    #[command(about = "Delete the combo system of an operational/spare pair")]
    Delete {
        operational: String,
        spare: String,
        database: String,
    },
    #[command(about = "Delete a combo system by its name")]
    DeleteCombo { combo: String, database: String },
    #[command(about = "Point the operational device at the combo's spare")]
    Activate { combo: String, database: String },
    #[command(about = "Reset the operational device's spare pointer")]
    Deactivate { combo: String, database: String },
    #[command(about = "List combo systems")]
    List { database: String },
    #[command(about = "Show combo name, system id and detail link for a pair")]
    Show {
        operational: String,
        spare: String,
        database: String,
    },
    #[command(about = "Spares on the device's gateway already used in a combo")]
    Spares { operational: String, database: String },
    #[command(about = "Candidate operational devices")]
    Devices {
        /// 大小写不敏感的名称过滤
        #[arg(long)]
        filter: Option<String>,
        /// 设备类别（默认取 SPARE_OPERATIONAL_CLASS）
        #[arg(long)]
        class: Option<u32>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let services = match bootstrap() {
        Ok(services) => services,
        Err(err) => {
            eprintln!("spare-manager: {err}");
            return ExitCode::FAILURE;
        }
    };
    let outcome = run(&services, cli.command).await;
    log_metrics();
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "spare.manager", error = %err, "operation_failed");
            eprintln!("spare-manager: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(services: &Services, command: Command) -> Result<(), ComboError> {
    match command {
        Command::Create {
            operational,
            spare,
            database,
        } => {
            let created = services
                .lifecycle
                .create(&operational, &spare, &database)
                .await?;
            print_created(&services.config, &created);
        }
        Command::Delete {
            operational,
            spare,
            database,
        } => {
            let deleted = services
                .lifecycle
                .delete(&operational, &spare, &database)
                .await?;
            print_deleted(&deleted);
        }
        Command::DeleteCombo { combo, database } => {
            let deleted =
                delete_combo(&services.lifecycle, &services.combos, &combo, &database).await?;
            print_deleted(&deleted);
        }
        Command::Activate { combo, database } => {
            services.lifecycle.activate(&combo, &database).await?;
            println!("activated {combo}");
        }
        Command::Deactivate { combo, database } => {
            services.lifecycle.deactivate(&combo, &database).await?;
            println!("deactivated {combo}");
        }
        Command::List { database } => {
            for combo in services.combos.list_combos(&database).await? {
                println!("{combo}");
            }
        }
        Command::Show {
            operational,
            spare,
            database,
        } => {
            let resolved = services
                .combos
                .resolve_pair(&operational, &spare, &database)
                .await?;
            println!("{} (system id {})", resolved.name, resolved.system_id);
            if let Some(link) = services.config.system_link(resolved.system_id) {
                println!("  {link}");
            }
        }
        Command::Spares {
            operational,
            database,
        } => {
            for spare in services
                .combos
                .spares_available_for(&operational, &database)
                .await?
            {
                println!("{spare}");
            }
        }
        Command::Devices { filter, class } => {
            let class_id = class.unwrap_or(services.config.operational_class);
            for device in services
                .directory
                .devices_of_class(class_id, filter.as_deref())
            {
                println!("{device}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create() {
        let cli = Cli::try_parse_from([
            "spare-manager",
            "create",
            "RFMAG.866.19.ETH1",
            "RFNA.866.04.ETH1",
            "pro",
        ])
        .expect("cli");
        match cli.command {
            Command::Create {
                operational,
                spare,
                database,
            } => {
                assert_eq!(operational, "RFMAG.866.19.ETH1");
                assert_eq!(spare, "RFNA.866.04.ETH1");
                assert_eq!(database, "pro");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_devices_filters() {
        let cli = Cli::try_parse_from(["spare-manager", "devices", "--filter", "rfmag", "--class", "64"])
            .expect("cli");
        match cli.command {
            Command::Devices { filter, class } => {
                assert_eq!(filter.as_deref(), Some("rfmag"));
                assert_eq!(class, Some(64));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_delete_combo_subcommand() {
        let cli = Cli::try_parse_from(["spare-manager", "delete-combo", "RFMAG.866.19.ETH1_04", "dev"])
            .expect("cli");
        assert!(matches!(cli.command, Command::DeleteCombo { .. }));
    }

    #[test]
    fn activate_requires_database() {
        let err = Cli::try_parse_from(["spare-manager", "activate", "RFMAG.866.19.ETH1_04"])
            .expect_err("missing database");
        assert_eq!(err.exit_code(), 2);
    }
}
