// Copyright 2025. Command line renderer for gfxpath path text.
//
// Usage:
//   path-render render "<path>" <width> <height> [--scale N] [--at X Y] [--stroke] -o <output.bmp>
//   path-render ascii "<path>" <width> <height> [--scale N] [--at X Y] [--stroke]
//   path-render logo <mark|text|full> <width> <height> [--size W] [--rotate DEG] -o <output.bmp>

use path_render::{render_logo, render_path, save_bmp, Logo, Palette, PixelBuffer, RenderOptions};
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "render" => cmd_render(&args[2..], false),
        "ascii" => cmd_render(&args[2..], true),
        "logo" => cmd_logo(&args[2..]),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("path-render - draw path text with gfxpath");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  render \"<path>\" <width> <height> [--scale N] [--at X Y] [--stroke] -o <output.bmp>");
    eprintln!("      Fill (or only stroke) a path and save it as BMP.");
    eprintln!();
    eprintln!("  ascii \"<path>\" <width> <height> [--scale N] [--at X Y] [--stroke]");
    eprintln!("      Same as render, printed as ASCII art.");
    eprintln!();
    eprintln!("  logo <mark|text|full> <width> <height> [--size W] [--rotate DEG] -o <output.bmp>");
    eprintln!("      Draw the bundled logo centered in the image.");
}

fn parse_num<T: std::str::FromStr>(value: &str, what: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {}: '{}'", what, value);
        process::exit(1);
    })
}

fn save(output: &str, buf: &PixelBuffer) {
    if let Err(err) = save_bmp(Path::new(output), buf) {
        eprintln!("Failed to save {}: {}", output, err);
        process::exit(1);
    }
    println!("Saved: {}", output);
}

fn cmd_render(args: &[String], ascii: bool) {
    if args.len() < 3 {
        eprintln!("Usage: path-render render \"<path>\" <width> <height> [options] -o <output>");
        process::exit(1);
    }

    let text = &args[0];
    let mut opts = RenderOptions::new(parse_num(&args[1], "width"), parse_num(&args[2], "height"));
    let mut output_path: Option<String> = None;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "-o" if i + 1 < args.len() => {
                output_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--scale" if i + 1 < args.len() => {
                opts.scale100 = parse_num(&args[i + 1], "scale");
                i += 2;
            }
            "--at" if i + 2 < args.len() => {
                opts.offset.x = parse_num(&args[i + 1], "x");
                opts.offset.y = parse_num(&args[i + 2], "y");
                i += 3;
            }
            "--stroke" => {
                opts.filled = false;
                i += 1;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                i += 1;
            }
        }
    }

    if let Err(err) = gfxpath::try_parse_path(text) {
        eprintln!("Warning: {}; drawing the part before the error", err);
    }

    let buf = render_path(text, &opts);
    if ascii {
        let palette = Palette::default();
        print!("{}", buf.to_ascii(palette.stroke, palette.fill));
        return;
    }

    let output = output_path.unwrap_or_else(|| format!("path_{}x{}.bmp", opts.width, opts.height));
    save(&output, &buf);
}

fn cmd_logo(args: &[String]) {
    if args.len() < 3 {
        eprintln!("Usage: path-render logo <mark|text|full> <width> <height> [options] -o <output>");
        process::exit(1);
    }

    let logo = match args[0].as_str() {
        "mark" => Logo::Mark,
        "text" => Logo::Text,
        "full" => Logo::Full,
        other => {
            eprintln!("Unknown logo: '{}'. Use mark, text or full.", other);
            process::exit(1);
        }
    };
    let width: u32 = parse_num(&args[1], "width");
    let height: u32 = parse_num(&args[2], "height");

    let mut size = (width * 3 / 4).min(i16::MAX as u32) as i16;
    let mut rotation = 0i16;
    let mut output_path: Option<String> = None;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "-o" if i + 1 < args.len() => {
                output_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--size" if i + 1 < args.len() => {
                size = parse_num(&args[i + 1], "size");
                i += 2;
            }
            "--rotate" if i + 1 < args.len() => {
                rotation = parse_num(&args[i + 1], "rotation");
                i += 2;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                i += 1;
            }
        }
    }

    println!("Rendering {:?} logo at {}x{}, {} px wide, rotated {} degrees...", logo, width, height, size, rotation);
    let buf = render_logo(logo, width, height, size, rotation);

    let output = output_path.unwrap_or_else(|| format!("logo_{}x{}.bmp", width, height));
    save(&output, &buf);
}
