
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::exit;

use failure::Fail;
use image::ImageFormat;
use indicatif::{ProgressBar, ProgressStyle};

use slide_gif::{Animation, Renderer, Slide, FRAME_COUNT};

mod errors;

use crate::errors::{AppError, AppResult};



const POSTFIX: &str = "_animated";


#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Setting {
    input: PathBuf,
    output: Option<PathBuf>,
    slide: Slide,
}


fn main() {
    if let Err(err) = app() {
        let mut fail: &dyn Fail = &err;
        let mut message = err.to_string();
        while let Some(cause) = fail.cause() {
            message.push_str(&format!("\n\tcaused by: {}", cause));
            fail = cause;
        }
        eprintln!("{}\n", message);
        if is_usage_error(&err) {
            print_usage();
        }
        exit(1);
    }
}

fn print_usage() {
    eprintln!("{}", include_str!("usage.txt"));
}

fn is_usage_error(err: &AppError) -> bool {
    match err {
        AppError::Direction(_) | AppError::NotEnoughArgument | AppError::UnknownOption(_) => true,
        _ => false,
    }
}

fn app() -> AppResult<()> {
    let setting = parse_args(env::args().skip(1))?;
    run(&setting)?;
    Ok(())
}

/// Returns the path written, or `None` when the input type is not supported
fn run(setting: &Setting) -> AppResult<Option<PathBuf>> {
    let format = match input_format(&setting.input) {
        Some(format) => format,
        None => {
            eprintln!("Warning: unsupported file type, nothing written: {}", setting.input.display());
            return Ok(None);
        },
    };

    let file = File::open(&setting.input)?;
    let source = image::load(BufReader::new(file), format)?;

    let output = setting.output.clone().unwrap_or_else(|| output_path(&setting.input));
    let animation = render(&Renderer::new(&source, setting.slide), &setting.input);

    let mut out = BufWriter::new(File::create(&output)?);
    animation.encode(&mut out)?;

    Ok(Some(output))
}


fn render(renderer: &Renderer, input: &Path) -> Animation {
    let progress_bar = ProgressBar::new(FRAME_COUNT as u64);
    let style = ProgressStyle::default_bar()
        .template("[{bar:40.cyan/blue}] {pos:>2}/{len:2} frames | {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("█▌ "));
    progress_bar.set_message(
        input.file_name().map(|it| it.to_string_lossy().into_owned()).unwrap_or_default());

    let mut frames = Vec::with_capacity(FRAME_COUNT);
    for index in 0 .. FRAME_COUNT {
        frames.push(renderer.render_frame(index));
        progress_bar.inc(1);
    }
    progress_bar.finish_and_clear();

    Animation::new(frames)
}


fn parse_args<T: Iterator<Item = String>>(args: T) -> AppResult<Setting> {
    let mut setting = Setting::default();
    let mut input = None;

    let mut args = args.flat_map(split_assignment);

    #[allow(clippy::while_let_on_iterator)]
    while let Some(arg) = args.next() {
        let mut next = || args.next().ok_or(AppError::NotEnoughArgument);

        match &*arg {
            "-h" | "--help" => {
                print_usage();
                exit(0);
            },
            "-s" | "-start" | "--start" =>
                setting.slide.start = next()?.parse()?,
            "-e" | "-end" | "--end" =>
                setting.slide.end = next()?.parse()?,
            "-l" | "-loop" | "--loop" =>
                setting.slide.looped = next()? == "true",
            "-o" | "--output" =>
                setting.output = Some(PathBuf::from(next()?)),
            option if option.starts_with('-') && 1 < option.len() =>
                return Err(AppError::UnknownOption(option.to_owned())),
            filepath => {
                if input.is_none() {
                    input = Some(PathBuf::from(filepath));
                }
            }
        }
    }

    setting.input = input.ok_or(AppError::NotEnoughArgument)?;
    Ok(setting)
}

/// `--start=top` is read as `--start top`
fn split_assignment(arg: String) -> Vec<String> {
    if arg.starts_with('-') {
        if let Some(at) = arg.find('=') {
            return vec![arg[.. at].to_owned(), arg[at + 1 ..].to_owned()];
        }
    }
    vec![arg]
}


fn input_format(path: &Path) -> Option<ImageFormat> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    match &*extension {
        "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
        "png" => Some(ImageFormat::Png),
        "gif" => Some(ImageFormat::Gif),
        _ => None,
    }
}

fn output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().map(|it| it.to_string_lossy().into_owned()).unwrap_or_default();
    input.with_file_name(format!("{}{}.gif", stem, POSTFIX))
}
