use std::{fs, path::Path};

use pac::{
	decode::{self, Decoder},
	encode::{self, Encoder},
	format::{encode_entries, Entry, Header, Layout, ReservedFields},
	ErrorKind,
};
use tempfile::TempDir;

fn source_dir(files: &[(&str, &str)]) -> TempDir {
	let dir = tempfile::tempdir().expect("tempdir");
	for (name, data) in files {
		fs::write(dir.path().join(name), data).expect("write source");
	}
	dir
}

fn read_dir(dir: &Path) -> Vec<(String, Vec<u8>)> {
	let mut files = fs::read_dir(dir)
		.expect("read dir")
		.map(|entry| {
			let entry = entry.expect("dir entry");
			(
				entry.file_name().to_string_lossy().into_owned(),
				fs::read(entry.path()).expect("read file"),
			)
		})
		.collect::<Vec<_>>();
	files.sort();
	files
}

#[test]
fn two_file_scenario() {
	let src = source_dir(&[("a.txt", "abc"), ("bb.txt", "xy")]);
	let out = tempfile::tempdir().expect("tempdir");
	let archive = out.path().join("scenario.pac");

	let written = encode::write_archive(src.path(), Some(&archive), None).expect("builds");
	assert_eq!(written, archive);

	let bytes = fs::read(&archive).expect("read archive");
	let header = Header::decode(&bytes).expect("header");
	assert_eq!(header.string_size, 8);
	assert_eq!(header.file_count, 2);
	assert_eq!(header.entry_size().expect("entry size"), 32);
	assert_eq!(header.data_start, 96);
	assert_eq!(header.total_size, 101);
	assert_eq!(bytes.len(), 101);

	let dest = out.path().join("extracted");
	fs::create_dir(&dest).expect("mkdir");
	decode::extract(&archive, &dest, None).expect("extracts");
	assert_eq!(
		read_dir(&dest),
		vec![
			("a.txt".to_owned(), b"abc".to_vec()),
			("bb.txt".to_owned(), b"xy".to_vec()),
		]
	);
}

#[test]
fn round_trip_varied_names_and_sizes() {
	let big = (0..=255_u8).cycle().take(70_000).collect::<Vec<u8>>();
	let files = vec![
		("e", Vec::new()),
		("short.bin", vec![0, 1, 2]),
		("a_much_longer_file_name_for_the_column.dat", big),
		("caf\u{e9}.txt", b"latin-1 name".to_vec()),
	];

	let mut encoder = Encoder::new();
	for (name, data) in &files {
		encoder.add_file(*name, data.clone());
	}
	let bytes = encoder.finalise().expect("builds");

	let decoder = Decoder::new(&bytes).expect("decodes");
	let layout = decoder.layout().expect("has files");
	assert_eq!(layout.string_size(), 44);
	assert_eq!(layout.entry_size(), 96);

	assert_eq!(decoder.entries().len(), files.len());
	for (entry, (name, data)) in decoder.entries().iter().zip(&files) {
		assert_eq!(entry.name, *name);
		assert_eq!(decoder.entry_data(entry).expect("in bounds"), data.as_slice());
	}
}

#[test]
fn round_trip_through_disk() {
	let src = source_dir(&[
		("one.bin", "1"),
		("two.bin", "22"),
		("three.bin", "333"),
	]);
	let out = tempfile::tempdir().expect("tempdir");
	let archive = out.path().join("numbers.pac");
	encode::write_archive(src.path(), Some(&archive), None).expect("builds");

	let entries = decode::enumerate(&archive).expect("enumerates");
	assert_eq!(
		entries
			.iter()
			.map(|e| (e.name.as_str(), e.id, e.offset, e.size))
			.collect::<Vec<_>>(),
		vec![("one.bin", 0, 0, 1), ("three.bin", 1, 1, 3), ("two.bin", 2, 4, 2)]
	);

	let dest = pac::fs::extract_archive(&archive, None, None).expect("extracts");
	assert_eq!(dest, out.path().join("numbers"));
	assert_eq!(read_dir(&dest), read_dir(src.path()));
}

#[test]
fn extract_filter_writes_only_selected() {
	let src = source_dir(&[("keep.txt", "yes"), ("drop.txt", "no"), ("keep2.txt", "also")]);
	let out = tempfile::tempdir().expect("tempdir");
	let archive = out.path().join("mixed.pac");
	encode::write_archive(src.path(), Some(&archive), None).expect("builds");

	let dest = out.path().join("filtered");
	let only_keep = |entry: &Entry| entry.name.starts_with("keep");
	pac::fs::extract_archive(&archive, Some(&dest), Some(&only_keep)).expect("extracts");

	assert_eq!(
		read_dir(&dest),
		vec![
			("keep.txt".to_owned(), b"yes".to_vec()),
			("keep2.txt".to_owned(), b"also".to_vec()),
		]
	);
}

#[test]
fn build_filter_skips_paths() {
	let src = source_dir(&[("a.png", "png"), ("b.txt", "txt")]);
	let paths = pac::fs::list_files(src.path()).expect("lists");
	let pngs = |path: &Path| path.extension().map_or(false, |ext| ext == "png");
	let bytes = encode::build(&paths, Some(&pngs)).expect("builds");

	let decoder = Decoder::new(&bytes).expect("decodes");
	assert_eq!(decoder.entries().len(), 1);
	assert_eq!(decoder.entries()[0].name, "a.png");
}

#[test]
fn stored_offsets_are_honoured() {
	// payload holds the files out of order with a gap, which the writer never produces
	let layout = Layout::new(8, 32).expect("layout");
	let entries = vec![
		Entry {
			name: "first".into(),
			id: 0,
			offset: 6,
			size: 3,
			reserved: vec![],
		},
		Entry {
			name: "second".into(),
			id: 1,
			offset: 0,
			size: 4,
			reserved: vec![],
		},
	];
	let payload = b"2222..111";
	let data_start = 32 + 2 * 32;
	let mut bytes = Header::new(
		data_start,
		data_start + payload.len() as u32,
		2,
		8,
		ReservedFields::default(),
	)
	.encode()
	.expect("header");
	bytes.extend(encode_entries(&entries, layout).expect("directory"));
	bytes.extend(payload);

	let out = tempfile::tempdir().expect("tempdir");
	let archive = out.path().join("gaps.pac");
	fs::write(&archive, &bytes).expect("write");
	let dest = pac::fs::extract_archive(&archive, None, None).expect("extracts");
	assert_eq!(
		read_dir(&dest),
		vec![
			("first".to_owned(), b"111".to_vec()),
			("second".to_owned(), b"2222".to_vec()),
		]
	);
}

#[test]
fn out_of_bounds_entry_aborts_before_writing() {
	let mut encoder = Encoder::new();
	encoder.add_file("fine", *b"ok");
	encoder.add_file("cut", *b"0123456789");
	let mut bytes = encoder.finalise().expect("builds");
	bytes.truncate(bytes.len() - 5);

	let out = tempfile::tempdir().expect("tempdir");
	let archive = out.path().join("cut.pac");
	fs::write(&archive, &bytes).expect("write");
	let dest = out.path().join("dest");
	fs::create_dir(&dest).expect("mkdir");

	let err = decode::extract(&archive, &dest, None).expect_err("out of bounds");
	assert_eq!(err.kind(), Some(ErrorKind::OutOfBounds));
	assert!(read_dir(&dest).is_empty());
}

#[test]
fn unsafe_names_are_not_extracted() {
	let mut encoder = Encoder::new();
	encoder.add_file("../escape", *b"nope");
	let bytes = encoder.finalise().expect("builds");

	let out = tempfile::tempdir().expect("tempdir");
	let archive = out.path().join("evil.pac");
	fs::write(&archive, &bytes).expect("write");
	let dest = out.path().join("dest");
	fs::create_dir(&dest).expect("mkdir");

	let err = decode::extract(&archive, &dest, None).expect_err("unsafe");
	assert_eq!(err.kind(), Some(ErrorKind::UnsafeName));
	assert!(!out.path().join("escape").exists());
}

#[test]
fn explicit_output_needs_pac_extension() {
	let src = source_dir(&[("a", "a")]);
	let out = tempfile::tempdir().expect("tempdir");
	let target = out.path().join("archive.zip");

	let err = encode::write_archive(src.path(), Some(&target), None).expect_err("extension");
	assert_eq!(err.kind(), Some(ErrorKind::BadExtension));
	assert!(!target.exists());
}

#[test]
fn default_output_is_named_after_source_dir() {
	let root = tempfile::tempdir().expect("tempdir");
	let src = root.path().join("chr_010");
	fs::create_dir(&src).expect("mkdir");
	fs::write(src.join("x.bin"), b"x").expect("write");

	let written = encode::write_archive(&src, None, None).expect("builds");
	assert_eq!(written.file_name().expect("name"), "chr_010.pac");
	assert!(written.is_file());
}

#[test]
fn pre_seeded_width_rejects_long_names() {
	let src = source_dir(&[("tiny", "1"), ("much_too_long", "2")]);
	let mut encoder = Encoder::new().with_string_size(4);
	for path in pac::fs::list_files(src.path()).expect("lists") {
		encoder.add_path(&path).expect("reads");
	}
	let err = encoder.finalise().expect_err("too long");
	assert_eq!(
		err.kind(),
		Some(ErrorKind::NameTooLong {
			width: 4,
			length: 13
		})
	);
}

#[test]
fn uneven_directory_fails_to_parse() {
	let mut bytes = Header::new(32 + 45, 32 + 45, 2, 8, ReservedFields::default())
		.encode()
		.expect("header");
	bytes.resize(32 + 45, 0);

	let out = tempfile::tempdir().expect("tempdir");
	let archive = out.path().join("bad.pac");
	fs::write(&archive, &bytes).expect("write");
	assert_eq!(
		decode::enumerate(&archive).expect_err("uneven").kind(),
		Some(ErrorKind::UnevenDirectory {
			span: 45,
			file_count: 2
		})
	);
}

#[test]
fn missing_archive_is_io_error() {
	let out = tempfile::tempdir().expect("tempdir");
	let err = decode::enumerate(&out.path().join("absent.pac")).expect_err("missing");
	assert!(matches!(err, pac::Error::Io(_)));
}
