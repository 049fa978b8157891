use parallel_file_processor::error::{AppError, FileError};
use parallel_file_processor::utils::logging;
use parallel_file_processor::{App, Config};
use tracing::error;

/// 进程退出状态
#[derive(Debug, Clone, Copy)]
enum ExitStatus {
    Normal = 0,
    HelpShown = 1,
    Unknown = 2,
    FileNotFound = 3,
    FileReadFailure = 4,
}

fn exit(status: ExitStatus) -> ! {
    std::process::exit(status as i32)
}

fn print_help() {
    println!("\n{}", "=".repeat(60));
    println!("用法:");
    println!("    -f <filename>    => 指定要处理的文件（相对于当前目录）");
    println!("    -h | -H | -?     => 打印本帮助并退出");
    println!("{}\n", "=".repeat(60));
}

/// 解析命令行参数，成功时返回覆盖后的配置
fn read_args(mut config: Config) -> Config {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        print_help();
        exit(ExitStatus::HelpShown);
    }

    let mut index = 0;
    while index < args.len() {
        let flag = args[index].trim().to_string();
        index += 1;
        let value = args.get(index).map(|v| v.trim().to_string());

        match flag.as_str() {
            "-f" => {
                match value {
                    Some(filename) if !filename.is_empty() => {
                        config.input_file = filename;
                        index += 1;
                    }
                    _ => {
                        error!("❌ -f 后面必须跟文件名");
                        print_help();
                        exit(ExitStatus::HelpShown);
                    }
                }
            }
            "-?" | "-H" | "-h" => {
                print_help();
                exit(ExitStatus::HelpShown);
            }
            unknown => {
                error!("❌ 未知参数: '{}'", unknown);
                print_help();
                exit(ExitStatus::Unknown);
            }
        }
    }

    config
}

#[tokio::main]
async fn main() {
    // 初始化日志
    logging::init();

    // 加载配置，命令行参数可覆盖
    let config = read_args(Config::from_env());

    // 初始化并运行应用
    let mut app = App::initialize(config);
    match app.run().await {
        Ok(_) => exit(ExitStatus::Normal),
        Err(e) => {
            error!("❌ 运行失败: {}", e);
            let status = match e.downcast_ref::<AppError>() {
                Some(AppError::File(FileError::NotFound { .. })) => ExitStatus::FileNotFound,
                Some(AppError::File(_)) => ExitStatus::FileReadFailure,
                _ => ExitStatus::Unknown,
            };
            exit(status)
        }
    }
}
