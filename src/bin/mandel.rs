// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use log::info;
use mandelbrot::{encode_base64, RenderError, RenderOptions, RenderRequest};
use std::fs;
use std::io::{self, Write};
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_size(s: &str) -> Result<(), String> {
    match parse_pair::<usize>(s, 'x') {
        Some((w, h)) if w >= 1 && h >= 1 && w <= MAX_SIDE && h <= MAX_SIDE => Ok(()),
        Some(_) => Err(format!("Image sides must be between 1 and {}", MAX_SIDE)),
        None => Err("Could not parse output image size".to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const NO_SMOOTH: &str = "no-smooth";
const REQUEST: &str = "request";
const BASE64: &str = "base64";

const MAX_SIDE: usize = 16_384;
const MAX_ITERATIONS: usize = 1_000_000;

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .about("Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .required_unless(BASE64)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(BASE64)
                .long(BASE64)
                .help("Print the PNG to stdout as base64"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1024x1024")
                .validator(|s| validate_size(&s))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(CENTER)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.5,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Center of the view on the complex plane, as re,im"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("0")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        u32::max_value(),
                        "Could not parse zoom level",
                        "Zoom level must not be negative",
                    )
                })
                .help("Zoom level; each step shows 7/8 of the previous width"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("256")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_ITERATIONS,
                        "Could not parse iteration count",
                        &format!("Iteration count must be between 1 and {}", MAX_ITERATIONS),
                    )
                })
                .help("Iteration budget per point"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in renderer"),
        )
        .arg(
            Arg::with_name(NO_SMOOTH)
                .long(NO_SMOOTH)
                .help("Color by integer escape count, with visible bands"),
        )
        .arg(
            Arg::with_name(REQUEST)
                .long(REQUEST)
                .short("r")
                .takes_value(true)
                .help("Read center, zoom and iterations from a JSON request file instead"),
        )
        .get_matches()
}

fn request(matches: &ArgMatches) -> Result<RenderRequest, RenderError> {
    if let Some(path) = matches.value_of(REQUEST) {
        let body = fs::read_to_string(path)?;
        let request = RenderRequest::from_json(&body)?;
        // A request file skips the clap validators, so hold it to the same cap.
        if request.iterations < 1 || request.iterations > MAX_ITERATIONS {
            return Err(RenderError::InvalidRequest(format!(
                "Iteration count must be between 1 and {}, got {}",
                MAX_ITERATIONS, request.iterations
            )));
        }
        return Ok(request);
    }

    // The validators above have already vetted each of these.
    let (real, imaginary) = parse_pair(matches.value_of(CENTER).unwrap_or_default(), ',')
        .ok_or_else(|| RenderError::InvalidRequest("bad center".to_string()))?;
    let zoom = u32::from_str(matches.value_of(ZOOM).unwrap_or_default())
        .map_err(|e| RenderError::InvalidRequest(e.to_string()))?;
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap_or_default())
        .map_err(|e| RenderError::InvalidRequest(e.to_string()))?;
    Ok(RenderRequest {
        real,
        imaginary,
        zoom,
        iterations,
    })
}

fn options(matches: &ArgMatches) -> Result<RenderOptions, RenderError> {
    let (width, height) = parse_pair(matches.value_of(SIZE).unwrap_or_default(), 'x')
        .ok_or_else(|| RenderError::InvalidRequest("bad image size".to_string()))?;
    let threads = usize::from_str(matches.value_of(THREADS).unwrap_or_default())
        .map_err(|e| RenderError::InvalidRequest(e.to_string()))?;
    Ok(RenderOptions {
        width,
        height,
        smooth: !matches.is_present(NO_SMOOTH),
        threads,
    })
}

fn run(matches: &ArgMatches) -> Result<(), RenderError> {
    let request = request(matches)?;
    let options = options(matches)?;
    info!("rendering {:?} with {:?}", request, options);

    let png = request.render_png(&options)?;
    if let Some(path) = matches.value_of(OUTPUT) {
        fs::write(path, &png)?;
        info!("wrote {} bytes to {}", png.len(), path);
    }
    if matches.is_present(BASE64) {
        let text = encode_base64(&png);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{}", text)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
