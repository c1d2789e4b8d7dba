// The persisted logical schema: wire shape and lossless round-trips

use arranger_wasm::models::{Chord, Section, SectionKind, Song, TimeSignature};
use serde_json::{json, Value};

fn sample_song() -> Song {
    let mut song = Song::new();
    song.title = "Golden Hour".to_string();
    song.artist = Some("The Placeholders".to_string());
    song.key = Some("G".to_string());
    song.tempo = Some(122);
    song.notes = "capo 2".to_string();
    song.tags = Some(vec!["draft".to_string(), "set-b".to_string()]);

    let mut verse = Section::new(SectionKind::Verse, "Verse 1", 2, 4);
    verse.time_signature = Some(TimeSignature(6, 8));
    let mut chord = Chord::new("chord-g", "G");
    chord
        .payload
        .insert("root".into(), json!("G"));
    chord
        .payload
        .insert("quality".into(), json!("major"));
    verse.measures[0].beats[0].chord = Some(chord);
    verse.measures[0].beats[1].duration = 0.5;
    song.sections.push(verse);
    song
}

#[test]
fn test_wire_shape_matches_schema() {
    let song = sample_song();
    let value: Value = serde_json::from_str(&song.to_json().unwrap()).unwrap();

    // Top-level shape
    assert!(value["id"].is_string());
    assert_eq!(value["title"], "Golden Hour");
    assert_eq!(value["artist"], "The Placeholders");
    assert_eq!(value["key"], "G");
    assert_eq!(value["tempo"], 122);
    assert_eq!(value["timeSignature"], json!([4, 4]));
    assert_eq!(value["notes"], "capo 2");
    assert_eq!(value["tags"], json!(["draft", "set-b"]));

    // Dates are ISO-8601 strings
    let created = value["createdAt"].as_str().unwrap();
    assert!(created.contains('T'));
    chrono::DateTime::parse_from_rfc3339(created).unwrap();

    // Nested shape, camelCase keys, section "type" on the wire
    let section = &value["sections"][0];
    assert_eq!(section["type"], "verse");
    assert_eq!(section["timeSignature"], json!([6, 8]));
    let beat0 = &section["measures"][0]["beats"][0];
    assert_eq!(beat0["chord"]["symbol"], "G");
    assert_eq!(beat0["chord"]["quality"], "major");
    assert_eq!(beat0["duration"], 1.0);
    let beat1 = &section["measures"][0]["beats"][1];
    assert!(beat1["chord"].is_null());
    assert_eq!(beat1["duration"], 0.5);
}

#[test]
fn test_round_trip_is_lossless() {
    let song = sample_song();
    let once = song.to_json().unwrap();
    let back = Song::from_json(&once).unwrap();
    assert_eq!(back, song);

    // Serializing again produces the identical wire document
    assert_eq!(back.to_json().unwrap(), once);
}

#[test]
fn test_missing_optionals_default_on_load() {
    let json = json!({
        "id": "song-1",
        "title": "Bare",
        "timeSignature": [3, 4],
        "sections": [{
            "id": "sec-1",
            "name": "Verse 1",
            "type": "verse",
            "measures": [{
                "id": "m-1",
                "beats": [
                    {"id": "b-1", "chord": null},
                    {"id": "b-2", "chord": null}
                ]
            }]
        }],
        "createdAt": "2025-11-02T10:00:00+00:00",
        "updatedAt": "2025-11-02T10:00:00+00:00"
    });

    let song = Song::from_json(&json.to_string()).unwrap();
    assert_eq!(song.artist, None);
    assert_eq!(song.tags, None);
    assert_eq!(song.notes, "");
    assert_eq!(song.time_signature, TimeSignature(3, 4));
    // Omitted duration weights default to 1.0
    assert_eq!(song.sections[0].measures[0].beats[0].duration, 1.0);
}

#[test]
fn test_duplicate_slot_ids_rejected_on_load() {
    let json = json!({
        "id": "song-1",
        "title": "Broken",
        "timeSignature": [4, 4],
        "sections": [{
            "id": "sec-1",
            "name": "Verse 1",
            "type": "verse",
            "measures": [{
                "id": "m-1",
                "beats": [
                    {"id": "b-1", "chord": null},
                    {"id": "b-1", "chord": null}
                ]
            }]
        }],
        "createdAt": "2025-11-02T10:00:00+00:00",
        "updatedAt": "2025-11-02T10:00:00+00:00"
    });

    assert!(Song::from_json(&json.to_string()).is_err());
}

#[test]
fn test_unknown_chord_payload_survives_round_trip() {
    let wire = json!({
        "id": "chord-x",
        "symbol": "F#m7b5",
        "root": "F#",
        "quality": "half-diminished",
        "extensions": [7],
        "voicing": {"frets": [2, 0, 2, 2, 1, 0]}
    });

    let chord: Chord = serde_json::from_value(wire.clone()).unwrap();
    let back = serde_json::to_value(&chord).unwrap();
    assert_eq!(back, wire);
}
