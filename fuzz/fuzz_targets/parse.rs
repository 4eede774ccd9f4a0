#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|path: String| {
    let parsed = matrix_params::parse(&path);

    // One record per `/`-delimited piece after the leading slash, for any
    // input whatsoever.
    let stripped = match path.find('?') {
        Some(query) => &path[..query],
        None => path.as_str(),
    };
    let pieces = if stripped.is_empty() {
        0
    } else {
        stripped.split('/').count() - 1
    };
    assert_eq!(parsed.len(), pieces);
});
