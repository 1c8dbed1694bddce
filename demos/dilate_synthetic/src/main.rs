use argh::FromArgs;
use rand::{rngs::StdRng, Rng, SeedableRng};

use kas::{
    image::{Image, ImageSize},
    imgproc::{
        morphology::{DilationScanner, StructuringElement},
        parallel::ExecutionStrategy,
    },
};

const BACKGROUND: [u8; 1] = [0];
const FOREGROUND: [u8; 1] = [255];

#[derive(FromArgs)]
/// Dilate a random binary image with a disk and report what changed
struct Args {
    /// image width (default: 64)
    #[argh(option, default = "64")]
    width: usize,

    /// image height (default: 32)
    #[argh(option, default = "32")]
    height: usize,

    /// dilation radius (default: 2)
    #[argh(option, short = 'r', default = "2")]
    radius: i32,

    /// include the pixels touching the disk border
    #[argh(switch, short = 'b')]
    include_border: bool,

    /// probability of a foreground pixel (default: 0.02)
    #[argh(option, short = 'd', default = "0.02")]
    density: f64,

    /// random seed (default: 0)
    #[argh(option, short = 's', default = "0")]
    seed: u64,

    /// grow the background instead of the foreground
    #[argh(switch)]
    dilate_background: bool,

    /// number of threads, 0 runs on the current thread (default: 0)
    #[argh(option, short = 't', default = "0")]
    threads: usize,

    /// print the input and output images
    #[argh(switch, short = 'p')]
    print: bool,
}

fn print_image(title: &str, image: &Image<u8, 1>) {
    println!("{title}:");
    for row in image.as_slice().chunks_exact(image.width().max(1)) {
        let line: String = row
            .iter()
            .map(|&v| if v == FOREGROUND[0] { '#' } else { '.' })
            .collect();
        println!("{line}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    if !(0.0..=1.0).contains(&args.density) {
        return Err(format!("density must be in [0, 1], got {}", args.density).into());
    }

    // create a random binary image
    let mut rng = StdRng::seed_from_u64(args.seed);
    let size = ImageSize {
        width: args.width,
        height: args.height,
    };
    let data = (0..size.area())
        .map(|_| {
            if rng.random_bool(args.density) {
                FOREGROUND[0]
            } else {
                BACKGROUND[0]
            }
        })
        .collect();
    let image = Image::<u8, 1>::new(size, data)?;

    let element = StructuringElement::new(args.radius, args.include_border)?;
    log::info!(
        "structuring element: radius {}, include_border {}, {} offsets, {} rounds",
        element.radius(),
        element.include_border(),
        element.len(),
        element.prefix_counts().len() - 1
    );

    let strategy = match args.threads {
        0 => ExecutionStrategy::Serial,
        n => ExecutionStrategy::Fixed(n),
    };

    let start = std::time::Instant::now();
    let dilated = DilationScanner::new(&element)
        .with_strategy(strategy)
        .dilate(&image, &[BACKGROUND], args.dilate_background)?;
    log::info!("dilated {} in {:?}", size, start.elapsed());

    let count_foreground = |img: &Image<u8, 1>| {
        img.as_slice()
            .iter()
            .filter(|&&v| v == FOREGROUND[0])
            .count()
    };
    log::info!(
        "foreground pixels: {} -> {}, changed pixels: {}",
        count_foreground(&image),
        count_foreground(&dilated),
        image.count_diff(&dilated)?
    );

    if args.print {
        print_image("input", &image);
        print_image("dilated", &dilated);
    }

    Ok(())
}
