// ==========================================
// 出货格口产线分配 - 命令行入口
// ==========================================
// 子命令:
//   filter  记录表 → [{ CHUTE }]
//   lines   [{ CHUTE }] → 产线矩阵
//   run     两阶段串联
// ==========================================

use anyhow::Context;
use chute_lines::api::{run_job, JobInput, JobRequest, JobStage, OutputFormat};
use chute_lines::config::config_keys;
use chute_lines::engine::SystemDateSource;
use chute_lines::importer::InputFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// 出货记录筛选与格口产线分配
#[derive(Parser)]
#[command(name = "chute-lines", version)]
struct Cli {
    /// 配置文件（JSON）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 日志格式
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 过滤记录表，输出去重排序后的格口
    Filter {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// 将格口分配到产线，输出透视矩阵
    Lines {
        #[command(flatten)]
        io: IoArgs,
    },
    /// 过滤 + 产线分配
    Run {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Args)]
struct IoArgs {
    /// 输入文件（`-` 为标准输入）
    #[arg(short, long, default_value = "-")]
    input: String,

    /// 输入格式（默认按扩展名推断，标准输入为 json）
    #[arg(long, value_enum)]
    input_format: Option<InputFormatArg>,

    /// 输出文件（默认标准输出）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Json)]
    format: OutputFormatArg,
}

#[derive(Args)]
struct FilterArgs {
    /// 目标发货日 yyyy-MM-dd（默认今天）
    #[arg(short, long)]
    date: Option<String>,

    /// 优先级取值（rush / standard / any / 自由文本）
    #[arg(long)]
    priority: Option<String>,

    /// 优先级字段名
    #[arg(long)]
    priority_field: Option<String>,

    /// 匹配模式（equals / contains）
    #[arg(long)]
    match_mode: Option<String>,

    /// contains 模式下的子串
    #[arg(long)]
    substring: Option<String>,

    /// contains 模式下的极性（include / exclude）
    #[arg(long)]
    polarity: Option<String>,
}

impl FilterArgs {
    fn overrides(&self) -> Vec<(&str, &str)> {
        [
            (config_keys::PRIORITY_VALUE, &self.priority),
            (config_keys::PRIORITY_FIELD, &self.priority_field),
            (config_keys::MATCH_MODE, &self.match_mode),
            (config_keys::SUBSTRING, &self.substring),
            (config_keys::CONTAINS_POLARITY, &self.polarity),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormatArg {
    Json,
    Csv,
}

impl From<InputFormatArg> for InputFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Json => InputFormat::Json,
            InputFormatArg::Csv => InputFormat::Csv,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormatArg {
    Json,
    Csv,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Csv => OutputFormat::Csv,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    match cli.log_format {
        LogFormat::Text => chute_lines::logging::init(),
        LogFormat::Json => chute_lines::logging::init_json(),
    }
    tracing::debug!("{} v{}", chute_lines::APP_NAME, chute_lines::VERSION);

    let (stage, io_args, filter) = match &cli.command {
        Command::Filter { io, filter } => (JobStage::Filter, io, Some(filter)),
        Command::Lines { io } => (JobStage::Lines, io, None),
        Command::Run { io, filter } => (JobStage::Run, io, Some(filter)),
    };

    // 标准输入需先读入；文件交给导入层（含不存在/格式检查）
    let stdin_text = if io_args.input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("读取标准输入失败")?;
        Some(text)
    } else {
        None
    };
    let format = io_args.input_format.map(InputFormat::from);
    let input = match &stdin_text {
        Some(text) => JobInput::Text {
            text,
            format: format.unwrap_or(InputFormat::Json),
        },
        None => JobInput::File {
            path: Path::new(&io_args.input),
            format,
        },
    };

    let request = JobRequest {
        stage,
        config_path: cli.config.as_deref(),
        overrides: filter.map(FilterArgs::overrides).unwrap_or_default(),
        input,
        target_date: filter.and_then(|f| f.date.as_deref()),
        output_format: io_args.format.into(),
    };
    let output = run_job(&request, &SystemDateSource)?;

    write_output(io_args.output.as_deref(), &output)
}

fn write_output(path: Option<&Path>, output: &str) -> anyhow::Result<()> {
    match path {
        Some(out_path) => {
            if let Some(parent) = out_path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("创建输出目录失败: {}", parent.display()))?;
                }
            }
            fs::write(out_path, output)
                .with_context(|| format!("写入输出文件失败: {}", out_path.display()))?;
            tracing::info!("输出已写入: {}", out_path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            if !output.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}
