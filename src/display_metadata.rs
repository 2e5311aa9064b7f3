use crate::fits::Frame;
use crate::image::find_min_max;

/// Informational keywords shown for every frame when present
const INFO_KEYWORDS: [(&str, &str); 6] = [
    ("OBJECT", "Object"),
    ("TELESCOP", "Telescope"),
    ("INSTRUME", "Instrument"),
    ("DATE-OBS", "Observation Date"),
    ("EXPTIME", "Exposure Time"),
    ("FILTER", "Filter"),
];

pub fn print_frame_info(frame: &Frame) {
    println!("{:20}: {}", "HDU", frame.hdu_index);

    for (keyword, label) in INFO_KEYWORDS {
        if let Some(value) = frame.header.get(keyword) {
            println!("{label:20}: {value}");
        }
    }

    print_dimensions(frame);
    print_scaling(frame);
    print_data_range(frame);

    println!();
}

fn print_dimensions(frame: &Frame) {
    println!(
        "{:20}: {} [BITPIX {}]",
        "Dimensions",
        frame.image.dimensions(),
        frame.bitpix.value()
    );
}

fn print_scaling(frame: &Frame) {
    let bscale = frame.header.get_real("BSCALE");
    let bzero = frame.header.get_real("BZERO");
    if bscale.is_some() || bzero.is_some() {
        println!(
            "{:20}: bscale={}, bzero={}",
            "Scaling",
            bscale.unwrap_or(1.0),
            bzero.unwrap_or(0.0)
        );
    }
}

fn print_data_range(frame: &Frame) {
    if frame.image.is_empty() {
        return;
    }
    let (min, max) = find_min_max(frame.image.samples());
    println!("{:20}: {min} .. {max}", "Data Range");
}
