use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

#[path = "../tests/common/mod.rs"]
mod common;

fn main() {
    divan::main();
}

/// Sixteen directories of sixty four 1 KiB files each
fn get_input() -> Vec<u8> {
    let dirs = (0..16)
        .map(|d| {
            let files = (0..64)
                .map(|f| common::file(&format!("file{f:02}"), "dat", &[f as u8; 1024]))
                .collect();
            common::dir(&format!("dir{d:02}"), files)
        })
        .collect();
    common::build(dirs)
}

pub mod read {
    use divan::Bencher;
    use rez_archive::RezArchive;
    use std::io::{prelude::*, Cursor};

    use super::get_input;

    #[divan::bench]
    fn open(bencher: Bencher) {
        bencher.with_inputs(get_input).bench_refs(|data| {
            divan::black_box(RezArchive::new(Cursor::new(data)).unwrap());
        });
    }

    #[divan::bench]
    fn walk_tree(bencher: Bencher) {
        bencher
            .with_inputs(|| RezArchive::new(Cursor::new(get_input())).unwrap())
            .bench_refs(|rez| {
                rez.read().unwrap();
                divan::black_box(rez.len());
            });
    }

    #[divan::bench(sample_count = 1)]
    fn read_file_all(bencher: Bencher) {
        let mut rez = RezArchive::new(Cursor::new(get_input())).unwrap();
        rez.read().unwrap();

        bencher.bench_local(move || {
            let mut buffer = Vec::new();
            for i in 0..rez.len() {
                let mut file = rez.by_index(i).unwrap();
                file.read_to_end(&mut buffer).unwrap();
                buffer.clear();
            }
        });
    }
}
