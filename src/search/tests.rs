use super::client::{parse_search_response, parse_video_ref, SearchClient};
use crate::config::SearchSettings;

// Trimmed-down copy of a real v3 search payload: three good items, one item
// without a videoId (a channel hit) and one without thumbnails.
const SAMPLE_RESPONSE: &str = r#"{
  "kind": "youtube#searchListResponse",
  "items": [
    {
      "id": { "kind": "youtube#video", "videoId": "aaaaaaaaaaa" },
      "snippet": {
        "title": "First Song",
        "channelTitle": "Channel One",
        "thumbnails": {
          "default": { "url": "https://i.ytimg.com/vi/a/default.jpg" },
          "medium": { "url": "https://i.ytimg.com/vi/a/mqdefault.jpg" }
        }
      }
    },
    {
      "id": { "kind": "youtube#channel", "channelId": "UCxxxx" },
      "snippet": {
        "title": "A Channel, Not A Video",
        "thumbnails": { "default": { "url": "https://i.ytimg.com/ch.jpg" } }
      }
    },
    {
      "id": { "kind": "youtube#video", "videoId": "bbbbbbbbbbb" },
      "snippet": {
        "title": "Second Song",
        "channelTitle": "Channel Two",
        "thumbnails": { "default": { "url": "https://i.ytimg.com/vi/b/default.jpg" } }
      }
    },
    {
      "id": { "kind": "youtube#video", "videoId": "ccccccccccc" },
      "snippet": { "title": "No Thumbnails Here" }
    },
    {
      "id": { "kind": "youtube#video", "videoId": "ddddddddddd" },
      "snippet": {
        "title": "Third Song",
        "channelTitle": "Channel Three",
        "thumbnails": { "high": { "url": "https://i.ytimg.com/vi/d/hqdefault.jpg" } }
      }
    }
  ]
}"#;

#[test]
fn parse_drops_items_missing_required_fields() {
    let results = parse_search_response(SAMPLE_RESPONSE, 15).unwrap();

    // 5 raw items, one has no videoId and one no thumbnail.
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].id, "aaaaaaaaaaa");
    assert_eq!(results[1].id, "bbbbbbbbbbb");
    assert_eq!(results[2].id, "ddddddddddd");
}

#[test]
fn parse_preserves_api_order_and_fills_all_fields() {
    let results = parse_search_response(SAMPLE_RESPONSE, 15).unwrap();

    for r in &results {
        assert!(!r.id.is_empty());
        assert!(!r.title.is_empty());
        assert!(!r.thumbnail_url.is_empty());
    }
    assert_eq!(results[0].title, "First Song");
    // Medium thumbnail wins over default when both exist.
    assert_eq!(
        results[0].thumbnail_url,
        "https://i.ytimg.com/vi/a/mqdefault.jpg"
    );
    assert_eq!(results[0].channel.as_deref(), Some("Channel One"));
    assert_eq!(
        results[0].watch_url(),
        "https://www.youtube.com/watch?v=aaaaaaaaaaa"
    );
}

#[test]
fn parse_caps_result_count() {
    let results = parse_search_response(SAMPLE_RESPONSE, 2).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].id, "bbbbbbbbbbb");
}

#[test]
fn parse_rejects_malformed_payload() {
    assert!(parse_search_response("not json at all", 15).is_err());
    assert!(parse_search_response(r#"{"items": "nope"}"#, 15).is_err());
}

#[test]
fn parse_tolerates_missing_items_field() {
    let results = parse_search_response(r#"{"kind": "youtube#searchListResponse"}"#, 15).unwrap();
    assert!(results.is_empty());
}

#[test]
fn whitespace_query_short_circuits_without_network() {
    // Endpoint points at nothing routable; if a request were made this
    // would error instead of returning an empty list.
    let client = SearchClient::new(SearchSettings {
        api_key: "k".to_string(),
        endpoint: "http://127.0.0.1:1/search".to_string(),
        max_results: 15,
        timeout_secs: 1,
    })
    .unwrap();

    assert!(client.search("").unwrap().is_empty());
    assert!(client.search("   \t ").unwrap().is_empty());
}

#[test]
fn video_ref_parses_watch_urls() {
    for input in [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "http://youtube.com/watch?v=dQw4w9WgXcQ",
        "m.youtube.com/watch?v=dQw4w9WgXcQ",
        "youtube.com/watch?list=PL123&v=dQw4w9WgXcQ",
        "https://youtu.be/dQw4w9WgXcQ",
        "youtu.be/dQw4w9WgXcQ?t=42",
    ] {
        assert_eq!(
            parse_video_ref(input).as_deref(),
            Some("dQw4w9WgXcQ"),
            "failed for {input}"
        );
    }
}

#[test]
fn video_ref_rejects_keyword_queries() {
    assert_eq!(parse_video_ref("imagine dragons"), None);
    assert_eq!(parse_video_ref("dQw4w9WgXcQ"), None); // bare ids are ambiguous with keywords
    assert_eq!(parse_video_ref("https://example.com/watch?v=dQw4w9WgXcQ"), None);
    assert_eq!(parse_video_ref("youtube.com/watch?v=tooshort"), None);
    assert_eq!(parse_video_ref(""), None);
}
