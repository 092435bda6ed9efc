//! 批处理入口：创建或删除一个组合系统。

use clap::Parser;
use spare_manager::{bootstrap, log_metrics, print_created, print_deleted};
use std::process::ExitCode;
use tracing::error;

#[derive(Debug, Parser)]
#[command(about = "Create or delete a spare combo system", long_about = None)]
struct Args {
    /// 运行设备名
    #[arg(value_name = "OPERATIONAL")]
    operational: String,
    /// 备件设备名
    #[arg(value_name = "SPARE")]
    spare: String,
    /// 配置库实例（pro / dev）
    #[arg(value_name = "DATABASE")]
    database: String,
    /// 删除组合系统（默认创建）
    #[arg(long = "del")]
    delete: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let services = match bootstrap() {
        Ok(services) => services,
        Err(err) => {
            eprintln!("spare-combo: {err}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = if args.delete {
        services
            .lifecycle
            .delete(&args.operational, &args.spare, &args.database)
            .await
            .map(|deleted| print_deleted(&deleted))
    } else {
        services
            .lifecycle
            .create(&args.operational, &args.spare, &args.database)
            .await
            .map(|created| print_created(&services.config, &created))
    };
    log_metrics();
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "spare.manager", error = %err, "operation_failed");
            eprintln!("spare-combo: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positionals_and_delete_flag() {
        let args = Args::try_parse_from([
            "spare-combo",
            "RFMAG.866.19.ETH1",
            "RFNA.866.04.ETH1",
            "dev",
            "--del",
        ])
        .expect("args");
        assert_eq!(args.operational, "RFMAG.866.19.ETH1");
        assert_eq!(args.spare, "RFNA.866.04.ETH1");
        assert_eq!(args.database, "dev");
        assert!(args.delete);
    }

    #[test]
    fn missing_database_is_usage_error() {
        let err = Args::try_parse_from(["spare-combo", "RFMAG.866.19.ETH1", "RFNA.866.04.ETH1"])
            .expect_err("missing arg");
        assert_eq!(err.exit_code(), 2);
    }
}
