use rlepack::config::{RleConfig, RleMode};
use rlepack::pipeline;

fn main() {
	let data = b"hello    hello    hellooooooo".to_vec();
	let mut input = std::io::Cursor::new(&data);
	let mut compressed = Vec::new();
	let cfg = RleConfig::default().with_mode(RleMode::Strict);
	let stats = pipeline::compress(&mut input, &mut compressed, data.len() as u64, &cfg).unwrap();
	println!("compressed {} -> {}", stats.original_size, stats.compressed_size);

	let mut comp_cur = std::io::Cursor::new(compressed);
	let mut restored = Vec::new();
	let consumed = pipeline::decompress(&mut comp_cur, &mut restored, &cfg).unwrap();
	println!("restored {} bytes from {} body bytes", restored.len(), consumed);
}
