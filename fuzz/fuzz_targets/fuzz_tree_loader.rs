#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use nativecomp::config::{TreeFormat, TreeLoader};
use nativecomp::shell::{Shell, render};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let loader = TreeLoader::with_defaults();

    for format in [TreeFormat::Yaml, TreeFormat::Json] {
        // Loading may fail; anything that loads must render without panicking
        if let Ok(loaded) = loader.load_from_str(text, format, Path::new("fuzz")) {
            for shell in Shell::ALL {
                let _ = render(&loaded.root, Some("fuzz"), shell);
            }
        }
    }
});
