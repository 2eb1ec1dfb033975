use mirage::{Codec, Config, PngSink, PngSource, Viewport};
use std::{env, error::Error, fs, fs::File, io::BufReader, process};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let (cover, message, output) = match (args.next(), args.next(), args.next()) {
        (Some(cover), Some(message), Some(output)) => (cover, message, output),
        _ => {
            eprintln!("Usage: mirage <cover.png> <message> <output.png>");
            process::exit(2);
        }
    };

    let codec = Codec::new(Config::default());

    let file = BufReader::new(File::open(&cover)?);
    let stego = codec.hide(&message, PngSource::new(file), &PngSink, Viewport::default())?;
    fs::write(&output, &stego)?;

    let revealed = codec.reveal(PngSource::new(&stego[..]), Viewport::default())?;
    println!("Output: {revealed}");

    Ok(())
}
