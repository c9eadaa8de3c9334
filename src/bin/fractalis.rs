extern crate clap;
extern crate fractalis;
extern crate image;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use image::png::PNGEncoder;
use image::ColorType;
use num::Complex;
use std::fs::File;
use std::str::FromStr;

use fractalis::{render_threaded, ColorOptions, Family, Function, Params, Viewport};

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

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

const FAMILY: &str = "family";
const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const POWER: &str = "power";
const SEED: &str = "seed";
const PHOENIX_P: &str = "phoenix-p";
const PHOENIX_C: &str = "phoenix-c";
const FUNCTION: &str = "function";
const RELAXATION: &str = "relaxation";
const EPSILON: &str = "epsilon";
const COLORS: &str = "colors";
const COLOR_OFFSET: &str = "color-offset";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("fractalis")
        .version("0.1.0")
        .about("Escape-time and Newton fractal renderer")
        .arg(
            Arg::with_name(FAMILY)
                .required(true)
                .long(FAMILY)
                .short("f")
                .takes_value(true)
                .possible_values(&["mandelbrot", "julia", "phoenix", "newton"])
                .help("Fractal family to render"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the viewport (default: family's classic view)"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the viewport (default: family's classic view)"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_number::<usize>(&s, "Could not parse iteration count")
                })
                .help("Iteration budget per pixel"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| match usize::from_str(&s) {
                    Ok(i) if i >= 1 && i <= max_threads => Ok(()),
                    Ok(_) => Err(format!("Thread count must be between 1 and {}", max_threads)),
                    Err(_) => Err("Could not parse thread count".to_string()),
                })
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(POWER)
                .long(POWER)
                .takes_value(true)
                .default_value("2.0")
                .validator(|s| validate_number::<f64>(&s, "Could not parse power"))
                .help("Mandelbrot exponent p"),
        )
        .arg(
            Arg::with_name(SEED)
                .long(SEED)
                .takes_value(true)
                .default_value("0.0,0.64")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse Julia constant"))
                .help("Julia constant c as re,im"),
        )
        .arg(
            Arg::with_name(PHOENIX_P)
                .long(PHOENIX_P)
                .takes_value(true)
                .default_value("0.5667")
                .validator(|s| validate_number::<f64>(&s, "Could not parse Phoenix P"))
                .help("Phoenix constant P"),
        )
        .arg(
            Arg::with_name(PHOENIX_C)
                .long(PHOENIX_C)
                .takes_value(true)
                .default_value("-0.5")
                .validator(|s| validate_number::<f64>(&s, "Could not parse Phoenix c"))
                .help("Phoenix constant c"),
        )
        .arg(
            Arg::with_name(FUNCTION)
                .long(FUNCTION)
                .takes_value(true)
                .default_value("cubic")
                .possible_values(&["sine", "cosine", "trig", "cubic"])
                .help("Newton function/derivative pair"),
        )
        .arg(
            Arg::with_name(RELAXATION)
                .long(RELAXATION)
                .takes_value(true)
                .default_value("1.0")
                .validator(|s| validate_number::<f64>(&s, "Could not parse relaxation factor"))
                .help("Newton relaxation factor a"),
        )
        .arg(
            Arg::with_name(EPSILON)
                .long(EPSILON)
                .takes_value(true)
                .default_value("0.001")
                .validator(|s| validate_number::<f64>(&s, "Could not parse epsilon"))
                .help("Newton convergence threshold"),
        )
        .arg(
            Arg::with_name(COLORS)
                .long(COLORS)
                .takes_value(true)
                .default_value("5.0")
                .validator(|s| validate_number::<f64>(&s, "Could not parse color count"))
                .help("Hue cycles across the palette"),
        )
        .arg(
            Arg::with_name(COLOR_OFFSET)
                .long(COLOR_OFFSET)
                .takes_value(true)
                .default_value("0.0")
                .validator(|s| validate_number::<f64>(&s, "Could not parse color offset"))
                .help("Constant hue offset"),
        )
        .get_matches()
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), std::io::Error> {
    let output = File::create(outfile)?;
    let encoder = PNGEncoder::new(output);
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::RGB(8))?;
    Ok(())
}

fn main() {
    let matches = args();

    let family = Family::from_str(matches.value_of(FAMILY).unwrap())
        .expect("Error parsing fractal family");
    let size: (usize, usize) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let itermax = usize::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Error parsing iteration count");
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Error parsing thread count");

    let default_vp = family.default_viewport();
    let leftlower = match matches.value_of(LEFTLOWER) {
        Some(s) => parse_complex(s).expect("Error parsing left lower corner"),
        None => Complex::new(default_vp.xmin, default_vp.ymin),
    };
    let rightupper = match matches.value_of(RIGHTUPPER) {
        Some(s) => parse_complex(s).expect("Error parsing right upper corner"),
        None => Complex::new(default_vp.xmax, default_vp.ymax),
    };

    let viewport = match Viewport::new(leftlower.re, rightupper.re, leftlower.im, rightupper.im) {
        Ok(vp) => vp,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let function = Function::by_name(matches.value_of(FUNCTION).unwrap())
        .expect("Error parsing Newton function");
    let params = Params {
        power: Some(f64::from_str(matches.value_of(POWER).unwrap()).unwrap()),
        seed: parse_complex(matches.value_of(SEED).unwrap()),
        phoenix_p: Some(f64::from_str(matches.value_of(PHOENIX_P).unwrap()).unwrap()),
        phoenix_c: Some(f64::from_str(matches.value_of(PHOENIX_C).unwrap()).unwrap()),
        function: Some(function),
        relaxation: Some(f64::from_str(matches.value_of(RELAXATION).unwrap()).unwrap()),
        epsilon: Some(f64::from_str(matches.value_of(EPSILON).unwrap()).unwrap()),
        color: ColorOptions {
            color_count: f64::from_str(matches.value_of(COLORS).unwrap()).unwrap(),
            color_offset: f64::from_str(matches.value_of(COLOR_OFFSET).unwrap()).unwrap(),
            ..ColorOptions::default()
        },
    };

    match render_threaded(family, size.0, size.1, &viewport, itermax, &params, threads) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(image) => {
            if let Err(e) = write_image(matches.value_of(OUTPUT).unwrap(), &image.data, size) {
                eprintln!("Could not write {}: {}", matches.value_of(OUTPUT).unwrap(), e);
                std::process::exit(1);
            }
        }
    }
}
