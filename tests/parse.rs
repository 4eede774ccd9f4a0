use matrix_params::{parse, parse_with, MatrixValue, ParseOptions};

macro_rules! parse_tests {
    ($($name:ident {
        path = $path:literal,
        segments = [$(
            $segment:literal => { $( $key:literal : $val:expr ),* $(,)? }
        ),* $(,)?]
    }),* $(,)?) => { $(
        #[test]
        fn $name() {
            let parsed = parse($path);

            let expected: Vec<(&str, Vec<(&str, MatrixValue)>)> = vec![$(
                ($segment, vec![$( ($key, MatrixValue::from($val)) ),*])
            ),*];

            assert_eq!(
                parsed.len(),
                expected.len(),
                "wrong segment count for {:?}",
                $path
            );

            for (record, (segment, pairs)) in parsed.iter().zip(&expected) {
                assert_eq!(
                    record.segment, *segment,
                    "wrong segment name for {:?}",
                    $path
                );

                let got: Vec<(&str, &MatrixValue)> = record.matrix.iter().collect();
                let want: Vec<(&str, &MatrixValue)> =
                    pairs.iter().map(|(key, value)| (*key, value)).collect();
                assert_eq!(got, want, "wrong matrix for segment {:?} of {:?}", segment, $path);
            }
        }
    )* };
}

parse_tests! {
    root {
        path = "/",
        segments = ["" => {}]
    },
    plain_segment {
        path = "/home",
        segments = ["home" => {}]
    },
    single_pair {
        path = "/home;name=raghav",
        segments = ["home" => { "name": "raghav" }]
    },
    trailing_semicolon_ignored {
        path = "/home;name=raghav;",
        segments = ["home" => { "name": "raghav" }]
    },
    trailing_semicolon_run_ignored {
        path = "/home;name=raghav;;;",
        segments = ["home" => { "name": "raghav" }]
    },
    percent_decoded_values {
        path = "/index;name=raghav%20dua",
        segments = ["index" => { "name": "raghav dua" }]
    },
    percent_decoded_keys {
        path = "/index;full%20name=dua",
        segments = ["index" => { "full name": "dua" }]
    },
    last_declaration_wins {
        path = "/index;name=raghav;name=tyrion;name=lannister",
        segments = ["index" => { "name": "lannister" }]
    },
    bare_keys_dropped {
        path = "/index;a;b=alphabet;c",
        segments = ["index" => { "b": "alphabet" }]
    },
    empty_value_recorded {
        path = "/index;name=;age=20",
        segments = ["index" => { "name": "", "age": "20" }]
    },
    empty_key_recorded {
        path = "/index;=value",
        segments = ["index" => { "": "value" }]
    },
    empty_key_and_value {
        path = "/;=",
        segments = ["" => { "": "" }]
    },
    comma_separated_values {
        path = "/index;list=a,b,c",
        segments = ["index" => { "list": vec!["a", "b", "c"] }]
    },
    empty_comma_runs_survive {
        path = "/index;list=a,b,,,",
        segments = ["index" => { "list": vec!["a", "b", "", "", ""] }]
    },
    multi_segment {
        path = "/club;name=lakers;address=downtown/members;role=guest",
        segments = [
            "club" => { "name": "lakers", "address": "downtown" },
            "members" => { "role": "guest" },
        ]
    },
    empty_segments_keep_their_matrices {
        path = "/;key=value/;green=house",
        segments = [
            "" => { "key": "value" },
            "" => { "green": "house" },
        ]
    },
    trailing_slash_adds_empty_record {
        path = "/a/b/",
        segments = ["a" => {}, "b" => {}, "" => {}]
    },
    unstripped_query_never_leaks {
        path = "/team;name=lakers?city=LA",
        segments = ["team" => { "name": "lakers" }]
    },
    query_on_bare_path {
        path = "/home?a=b",
        segments = ["home" => {}]
    },
    segment_keeps_text_before_first_separator {
        path = "/a=b;k=v",
        segments = ["a=b" => { "k": "v" }]
    },
}

#[test]
fn record_count_matches_piece_count() {
    for (path, pieces) in [
        ("/", 1),
        ("/home", 1),
        ("/a/b", 2),
        ("/a/b/", 3),
        ("//", 2),
        ("/;x=1/;y=2/z", 3),
    ] {
        assert_eq!(parse(path).len(), pieces, "for {:?}", path);
    }
}

#[test]
fn empty_input_yields_no_segments() {
    assert!(parse("").is_empty());
}

#[test]
fn path_without_leading_slash_has_no_addressable_segments() {
    assert!(parse("abc").is_empty());
    assert_eq!(parse("abc/def").len(), 1);
}

#[test]
fn reparsing_the_winning_declaration_is_stable() {
    let parsed = parse("/index;name=raghav;name=tyrion;name=lannister");
    let alone = parse("/index;name=lannister");
    assert_eq!(parsed, alone);
}

#[test]
fn max_keys_caps_tokens_per_segment() {
    let opts = ParseOptions { max_keys: Some(2) };

    let parsed = parse_with("/index;a=1;b=2;c=3", &opts);
    let keys: Vec<&str> = parsed[0].matrix.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["a", "b"]);

    // Bare tokens count toward the cap even though they record nothing.
    let parsed = parse_with("/index;x;a=1;b=2", &opts);
    let keys: Vec<&str> = parsed[0].matrix.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["a"]);

    // The cap applies per segment, not per path.
    let parsed = parse_with("/a;k=1;l=2;m=3/b;n=4;o=5;p=6", &opts);
    assert_eq!(parsed[0].matrix.len(), 2);
    assert_eq!(parsed[1].matrix.len(), 2);
}

#[test]
fn output_serializes_directly() {
    let parsed = parse("/club;name=lakers;list=a,,b/members");

    assert_eq!(
        serde_json::to_string(&parsed).unwrap(),
        concat!(
            r#"[{"segment":"club","matrix":{"name":"lakers","list":["a","","b"]}},"#,
            r#"{"segment":"members","matrix":{}}]"#,
        ),
    );
}

#[test]
fn never_panics_on_hostile_input() {
    for path in [
        ";;;",
        "/;;;",
        "/=;=;=",
        "/%",
        "/%2",
        "/a;%zz=%zz",
        "/a;=,=;,=,",
        "/?;also=query",
        "?only=query",
        "/\u{1F980};crab=%F0%9F%A6%80",
    ] {
        let _ = parse(path);
    }
}
