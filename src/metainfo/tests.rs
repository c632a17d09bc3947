use super::*;
use crate::bencode::{decode, BencodeError, Value};
use bytes::Bytes;

const SINGLE: &[u8] = b"d8:announce31:http://tracker.example/announce7:comment4:test10:created by9:mktorrent13:creation datei1700000000e4:infod6:lengthi1024e4:name9:lenna.jpg12:piece lengthi16384e6:pieces20:AAAAAAAAAAAAAAAAAAAAee";
const SINGLE_HASH: &str = "2f9de1b86c80302b8e42f4b2da07733fe58e8357";
const SINGLE_WITH_SOURCE_HASH: &str = "fcb05e5cedfc950873b51154e6eca0d21c2dbf06";

const MULTI: &[u8] = b"d8:announce31:http://tracker.example/announce13:announce-listll31:http://tracker.example/announceel25:udp://backup.example:6969ee4:infod5:filesld6:lengthi100e4:pathl5:a.txteed6:lengthi200e4:pathl3:sub5:b.txteee4:name6:cxkcxk12:piece lengthi16384e6:pieces40:BBBBBBBBBBBBBBBBBBBBCCCCCCCCCCCCCCCCCCCCee";
const MULTI_HASH: &str = "05b012adcba2044f6ea09f942f82c70d49ccd613";

// SINGLE's info dictionary with its keys written in reverse order.
const SINGLE_UNSORTED: &[u8] = b"d4:infod6:pieces20:AAAAAAAAAAAAAAAAAAAA12:piece lengthi16384e4:name9:lenna.jpg6:lengthi1024ee8:announce3:urle";

const UNKNOWN_KEYS: &[u8] = b"d7:comment1:c4:infod5:filesld6:lengthi1e6:md5sum3:abc4:pathl1:aeee4:name1:d12:piece lengthi1e6:pieces0:4:salt1:se8:url-listl14:http://mirror/ee";

// Name "\u{4f60}\u{597d}" and comment "\u{6d4b}\u{8bd5}" encoded as GBK.
const GBK: &[u8] = b"d7:comment4:\xB2\xE2\xCA\xD48:encoding3:GBK4:infod6:lengthi1e4:name4:\xC4\xE3\xBA\xC312:piece lengthi16384e6:pieces20:AAAAAAAAAAAAAAAAAAAAee";
const GBK_HASH: &str = "376a96e8d1c36aea5a457846d8f67c5350bfc68c";

const COMMENT_NOT_STRING: &[u8] =
    b"d7:commenti5e4:infod4:name1:x12:piece lengthi1e6:pieces0:6:lengthi1eee";

fn info_with(entries: &[(&str, Value)]) -> Vec<u8> {
    let mut info = crate::bencode::Dict::new();
    for (key, value) in entries {
        info.insert(Bytes::copy_from_slice(key.as_bytes()), value.clone());
    }
    let mut root = crate::bencode::Dict::new();
    root.insert(Bytes::from_static(b"info"), Value::Dict(info));
    crate::bencode::encode(&Value::Dict(root)).unwrap()
}

fn base_info() -> Vec<(&'static str, Value)> {
    vec![
        ("name", Value::string("x")),
        ("piece length", Value::Integer(16384)),
        ("pieces", Value::Bytes(Bytes::from_static(&[0u8; 20]))),
    ]
}

#[test]
fn test_parse_single_file() {
    let torrent = Metainfo::from_bytes(SINGLE).unwrap();

    assert_eq!(torrent.info.name, "lenna.jpg");
    assert_eq!(torrent.info.piece_length, 16384);
    assert_eq!(torrent.info.piece_count(), 1);
    assert_eq!(torrent.info.piece_hash(0), Some([b'A'; 20]));
    assert_eq!(torrent.info.piece_hash(1), None);
    assert_eq!(torrent.info.layout, FileLayout::Single { length: 1024 });
    assert!(!torrent.info.is_multi_file());
    assert!(!torrent.info.is_private());
    assert_eq!(torrent.info.source, None);
    assert_eq!(torrent.announce(), Some("http://tracker.example/announce"));
    assert_eq!(torrent.comment(), Some("test"));
    assert_eq!(torrent.created_by(), Some("mktorrent"));
    assert_eq!(torrent.creation_date, Some(1_700_000_000));
    assert_eq!(torrent.announce_list, None);
    assert!(torrent.extra.is_empty());

    let files = torrent.info.files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, std::path::PathBuf::from("lenna.jpg"));
    assert_eq!(files[0].length, 1024);
}

#[test]
fn test_parse_multi_file() {
    let torrent = Metainfo::from_bytes(MULTI).unwrap();

    assert_eq!(torrent.info.name, "cxkcxk");
    assert!(torrent.info.is_multi_file());
    assert_eq!(torrent.info.total_length(), 300);
    assert_eq!(torrent.info.piece_count(), 2);

    let FileLayout::Multi { ref files } = torrent.info.layout else {
        panic!("expected multi-file layout");
    };
    assert_eq!(files[1].path_string(), "sub/b.txt");

    let entries = torrent.info.files();
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0].path,
        std::path::Path::new("cxkcxk").join("a.txt")
    );
    assert_eq!(entries[0].offset, 0);
    assert_eq!(
        entries[1].path,
        std::path::Path::new("cxkcxk").join("sub").join("b.txt")
    );
    assert_eq!(entries[1].offset, 100);

    assert_eq!(
        torrent.announce_list,
        Some(vec![
            vec![Text::from("http://tracker.example/announce")],
            vec![Text::from("udp://backup.example:6969")],
        ])
    );
    assert_eq!(
        torrent.trackers(),
        vec![
            Text::from("http://tracker.example/announce"),
            Text::from("udp://backup.example:6969"),
        ]
    );
}

#[test]
fn test_info_hash_known_values() {
    let single = Metainfo::from_bytes(SINGLE).unwrap();
    assert_eq!(single.info_hash_hex().unwrap(), SINGLE_HASH);

    let multi = Metainfo::from_bytes(MULTI).unwrap();
    assert_eq!(multi.info_hash().unwrap().to_string(), MULTI_HASH);
}

#[test]
fn test_info_hash_is_stable() {
    let torrent = Metainfo::from_bytes(SINGLE).unwrap();
    let first = torrent.info_hash().unwrap();
    let second = torrent.info_hash().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_hex().len(), 40);
}

#[test]
fn test_info_hash_ignores_source_key_order() {
    let torrent = Metainfo::from_bytes(SINGLE_UNSORTED).unwrap();
    assert_eq!(torrent.info_hash_hex().unwrap(), SINGLE_HASH);
}

#[test]
fn test_canonical_roundtrip_is_byte_identical() {
    for data in [SINGLE, MULTI] {
        let torrent = Metainfo::from_bytes(data).unwrap();
        assert_eq!(torrent.to_bytes().unwrap(), data);
    }
}

#[test]
fn test_roundtrip_preserves_structure() {
    let mut torrent = Metainfo::from_bytes(MULTI).unwrap();
    torrent.encoding = Some("UTF-8".into());
    torrent.info.private = Some(true);

    let reloaded = Metainfo::from_bytes(&torrent.to_bytes().unwrap()).unwrap();
    assert_eq!(reloaded, torrent);
    assert_eq!(reloaded.info_hash().unwrap(), torrent.info_hash().unwrap());
}

#[test]
fn test_unknown_keys_are_retained() {
    let torrent = Metainfo::from_bytes(UNKNOWN_KEYS).unwrap();

    assert!(torrent.extra.contains_key(b"url-list".as_slice()));
    assert!(torrent.info.extra.contains_key(b"salt".as_slice()));
    let FileLayout::Multi { ref files } = torrent.info.layout else {
        panic!("expected multi-file layout");
    };
    assert_eq!(
        files[0].extra.get(b"md5sum".as_slice()).and_then(Value::as_str),
        Some("abc")
    );

    assert_eq!(torrent.to_bytes().unwrap(), UNKNOWN_KEYS);
}

#[test]
fn test_non_utf8_text_roundtrip() {
    let torrent = Metainfo::from_bytes(GBK).unwrap();

    assert_eq!(torrent.info.name.as_bytes(), b"\xC4\xE3\xBA\xC3");
    assert_eq!(torrent.info.name.as_str(), None);
    assert!(!torrent.info.name.is_utf8());
    assert_eq!(torrent.comment(), None);
    assert_eq!(
        torrent.comment.as_ref().map(Text::as_bytes),
        Some(&b"\xB2\xE2\xCA\xD4"[..])
    );
    assert_eq!(torrent.encoding(), Some("GBK"));
    assert_eq!(torrent.info_hash_hex().unwrap(), GBK_HASH);

    let saved = torrent.to_bytes().unwrap();
    assert_eq!(saved, GBK);
    let reloaded = Metainfo::from_bytes(&saved).unwrap();
    assert_eq!(reloaded, torrent);
    assert_eq!(reloaded.info_hash_hex().unwrap(), GBK_HASH);
}

#[test]
fn test_non_utf8_file_path() {
    let file = decode(b"d6:lengthi3e4:pathl3:dir2:\xC4\xE3ee").unwrap();
    let mut entries = base_info();
    entries.push(("files", Value::List(vec![file])));
    let data = info_with(&entries);

    let torrent = Metainfo::from_bytes(&data).unwrap();
    let FileLayout::Multi { ref files } = torrent.info.layout else {
        panic!("expected multi-file layout");
    };
    assert_eq!(files[0].path[0], "dir");
    assert_eq!(files[0].path[1].as_bytes(), b"\xC4\xE3");
    assert_eq!(files[0].path_string(), "dir/\u{FFFD}\u{FFFD}");
    assert_eq!(torrent.to_bytes().unwrap(), data);
}

#[test]
fn test_private_flag() {
    let mut entries = base_info();
    entries.push(("length", Value::Integer(1)));
    entries.push(("private", Value::Integer(1)));
    let torrent = Metainfo::from_bytes(&info_with(&entries)).unwrap();
    assert_eq!(torrent.info.private, Some(true));
    assert!(torrent.info.is_private());

    entries.pop();
    entries.push(("private", Value::Integer(2)));
    assert!(matches!(
        Metainfo::from_bytes(&info_with(&entries)),
        Err(MetainfoError::InvalidField("private"))
    ));
}

#[test]
fn test_ambiguous_file_mode() {
    let mut both = base_info();
    both.push(("length", Value::Integer(1)));
    let file = decode(b"d6:lengthi1e4:pathl1:aee").unwrap();
    both.push(("files", Value::List(vec![file])));
    assert!(matches!(
        Metainfo::from_bytes(&info_with(&both)),
        Err(MetainfoError::AmbiguousFileMode)
    ));

    assert!(matches!(
        Metainfo::from_bytes(&info_with(&base_info())),
        Err(MetainfoError::AmbiguousFileMode)
    ));
}

#[test]
fn test_empty_files_list_rejected() {
    let mut entries = base_info();
    entries.push(("files", Value::List(vec![])));
    assert!(matches!(
        Metainfo::from_bytes(&info_with(&entries)),
        Err(MetainfoError::InvalidField("files"))
    ));
}

#[test]
fn test_file_without_path_rejected() {
    let mut entries = base_info();
    let file = decode(b"d6:lengthi1ee").unwrap();
    entries.push(("files", Value::List(vec![file])));
    assert!(matches!(
        Metainfo::from_bytes(&info_with(&entries)),
        Err(MetainfoError::MissingField("file path"))
    ));
}

#[test]
fn test_pieces_length_not_multiple_of_20() {
    let entries = vec![
        ("name", Value::string("x")),
        ("piece length", Value::Integer(16384)),
        ("pieces", Value::Bytes(Bytes::from_static(&[0u8; 21]))),
        ("length", Value::Integer(1)),
    ];
    assert!(matches!(
        Metainfo::from_bytes(&info_with(&entries)),
        Err(MetainfoError::InvalidField("pieces"))
    ));
}

#[test]
fn test_missing_and_mistyped_fields() {
    assert!(matches!(
        Metainfo::from_bytes(b"d8:announce3:urle"),
        Err(MetainfoError::MissingField("info"))
    ));
    assert!(matches!(
        Metainfo::from_bytes(b"d4:infoi1ee"),
        Err(MetainfoError::InvalidField("info"))
    ));
    assert!(matches!(
        Metainfo::from_bytes(b"li1ee"),
        Err(MetainfoError::InvalidField("root"))
    ));
    assert!(matches!(
        Metainfo::from_bytes(b"d4:infod12:piece lengthi1e6:pieces0:6:lengthi1eee"),
        Err(MetainfoError::MissingField("name"))
    ));
    assert!(matches!(
        Metainfo::from_bytes(b"d4:infod4:name1:x6:pieces0:6:lengthi1eee"),
        Err(MetainfoError::MissingField("piece length"))
    ));
    assert!(matches!(
        Metainfo::from_bytes(b"d4:infod4:name1:x12:piece lengthi1e6:lengthi1eee"),
        Err(MetainfoError::MissingField("pieces"))
    ));
    assert!(matches!(
        Metainfo::from_bytes(b"d4:infod4:name1:x12:piece lengthi0e6:pieces0:6:lengthi1eee"),
        Err(MetainfoError::InvalidField("piece length"))
    ));
    assert!(matches!(
        Metainfo::from_bytes(b"d4:infod4:name1:x12:piece lengthi1e6:pieces0:6:lengthi-1eee"),
        Err(MetainfoError::InvalidField("length"))
    ));
    assert!(matches!(
        Metainfo::from_bytes(COMMENT_NOT_STRING),
        Err(MetainfoError::InvalidField("comment"))
    ));
}

#[test]
fn test_malformed_bencode_surfaces_unchanged() {
    let truncated = &SINGLE[..SINGLE.len() - 10];
    let err = Metainfo::from_bytes(truncated).unwrap_err();
    assert!(matches!(err, MetainfoError::Bencode(_)));
    assert!(err.is_format_error());

    let mut trailing = SINGLE.to_vec();
    trailing.extend_from_slice(b"garbage");
    assert!(matches!(
        Metainfo::from_bytes(&trailing),
        Err(MetainfoError::Bencode(BencodeError::TrailingData { .. }))
    ));

    assert!(matches!(
        Metainfo::from_bytes(b""),
        Err(MetainfoError::Bencode(BencodeError::UnexpectedEof { .. }))
    ));
}

#[test]
fn test_repack_outside_info_keeps_hash() {
    let mut torrent = Metainfo::from_bytes(SINGLE).unwrap();
    let strategy = EditStrategy::new()
        .comment("TensoRaws")
        .announce("http://other.example/announce")
        .created_by("repack")
        .creation_date(1);
    assert!(!strategy.changes_info_hash());

    torrent.repack(&strategy).unwrap();

    assert_eq!(torrent.comment(), Some("TensoRaws"));
    assert_eq!(torrent.announce(), Some("http://other.example/announce"));
    assert_eq!(torrent.created_by(), Some("repack"));
    assert_eq!(torrent.creation_date, Some(1));
    assert_eq!(torrent.info_hash_hex().unwrap(), SINGLE_HASH);
}

#[test]
fn test_repack_info_source_changes_hash() {
    let mut torrent = Metainfo::from_bytes(SINGLE).unwrap();
    torrent
        .repack(
            &EditStrategy::new()
                .comment("TensoRaws")
                .info_source("https://github.com/TensoRaws"),
        )
        .unwrap();

    assert_eq!(torrent.comment(), Some("TensoRaws"));
    assert_eq!(torrent.info.source(), Some("https://github.com/TensoRaws"));
    assert_eq!(torrent.info_hash_hex().unwrap(), SINGLE_WITH_SOURCE_HASH);

    let again = Metainfo::from_bytes(SINGLE)
        .unwrap()
        .repacked(&EditStrategy::new().info_source("https://github.com/TensoRaws"))
        .unwrap();
    assert_eq!(again.info_hash().unwrap(), torrent.info_hash().unwrap());
}

#[test]
fn test_empty_strategy_leaves_torrent_untouched() {
    let original = Metainfo::from_bytes(SINGLE).unwrap();
    let strategy = EditStrategy::default();
    assert!(strategy.is_empty());

    let repacked = original.clone().repacked(&strategy).unwrap();
    assert_eq!(repacked, original);
    assert_eq!(repacked.to_bytes().unwrap(), SINGLE);
}

#[test]
fn test_integer_overflow_reported() {
    let info = Info::single_file("big", 16384, vec![0u8; 20], u64::MAX);
    let mut torrent = Metainfo::new(info);
    assert!(matches!(
        torrent.to_bytes(),
        Err(MetainfoError::IntegerOverflow("length"))
    ));
    assert!(matches!(
        torrent.repack(&EditStrategy::new().info_source("x")),
        Err(MetainfoError::IntegerOverflow("length"))
    ));
}

#[test]
fn test_built_from_scratch_roundtrip() {
    let mut file = File::new(["dir", "file.bin"], 5);
    file.extra
        .insert(Bytes::from_static(b"attr"), Value::string("x"));
    let mut torrent = Metainfo::new(Info::multi_file(
        "root",
        32768,
        vec![7u8; 40],
        vec![file, File::new(["other"], 9)],
    ));
    torrent.announce = Some("http://t/announce".into());

    let reloaded = Metainfo::from_bytes(&torrent.to_bytes().unwrap()).unwrap();
    assert_eq!(reloaded, torrent);
    assert_eq!(reloaded.info.total_length(), 14);
}

#[test]
fn test_info_hash_from_hex() {
    let hash = InfoHash::from_hex(SINGLE_HASH).unwrap();
    assert_eq!(hash.to_hex(), SINGLE_HASH);
    assert_eq!(hash.as_bytes().len(), 20);
    assert_eq!(SINGLE_HASH.parse::<InfoHash>().unwrap(), hash);
    assert_eq!(InfoHash::from_bytes(hash.as_bytes()).unwrap(), hash);

    assert!(InfoHash::from_hex("abc").is_err());
    assert!(InfoHash::from_hex(&"zz".repeat(20)).is_err());
    assert!(InfoHash::from_bytes(&[0u8; 19]).is_err());
}

#[test]
fn test_edit_strategy_builder() {
    let strategy = EditStrategy::new().info_source("src").creation_date(42);
    assert_eq!(strategy.info_source.as_deref(), Some("src"));
    assert_eq!(strategy.creation_date, Some(42));
    assert_eq!(strategy.comment, None);
    assert!(!strategy.is_empty());
    assert!(strategy.changes_info_hash());
}

#[test]
fn test_edit_strategy_from_partial_config() {
    let json = r#"{"comment": "TensoRaws", "info_source": "https://github.com/TensoRaws"}"#;
    let strategy: EditStrategy = serde_json::from_str(json).unwrap();
    assert_eq!(strategy.comment.as_deref(), Some("TensoRaws"));
    assert_eq!(strategy.announce, None);
    assert_eq!(strategy.created_by, None);
    assert_eq!(strategy.creation_date, None);

    let mut torrent = Metainfo::from_bytes(SINGLE).unwrap();
    torrent.repack(&strategy).unwrap();
    assert_eq!(torrent.comment(), Some("TensoRaws"));
    assert_eq!(torrent.info.source(), Some("https://github.com/TensoRaws"));
    assert_eq!(torrent.created_by(), Some("mktorrent"));
    assert_eq!(torrent.info_hash_hex().unwrap(), SINGLE_WITH_SOURCE_HASH);
}

#[test]
fn test_edit_strategy_config_field_names() {
    let json = r#"{"announce": "udp://t", "created_by": "me", "creation_date": 7}"#;
    let strategy: EditStrategy = serde_json::from_str(json).unwrap();
    assert_eq!(
        strategy,
        EditStrategy::new()
            .announce("udp://t")
            .created_by("me")
            .creation_date(7)
    );

    let empty: EditStrategy = serde_json::from_str("{}").unwrap();
    assert!(empty.is_empty());

    let json = serde_json::to_string(&strategy).unwrap();
    let back: EditStrategy = serde_json::from_str(&json).unwrap();
    assert_eq!(back, strategy);
}
