use crate::detection::record::{DecodeError, Detection, DetectionsPayload};

/// Outcome of reading the out-of-band detections header.
///
/// Malformed content is data here, not an error: callers fall back to the
/// plain detection endpoint for both `Absent` and `Malformed`.
#[derive(Debug)]
pub enum SideChannel {
    /// The response carried no detections header.
    Absent,
    /// The header was present but not decodable.
    Malformed(DecodeError),
    /// The header carried a detection list, possibly empty.
    Decoded(Vec<Detection>),
}

/// Decodes the raw header value, when one was present at all.
pub fn decode(raw: Option<&[u8]>) -> SideChannel {
    match raw {
        None => SideChannel::Absent,
        Some(bytes) => match DetectionsPayload::decode_bytes(bytes) {
            Ok(payload) => SideChannel::Decoded(payload.detections),
            Err(err) => SideChannel::Malformed(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_is_absent() {
        assert!(matches!(decode(None), SideChannel::Absent));
    }

    #[test]
    fn malformed_header_is_recovered_not_fatal() {
        let outcome = decode(Some(b"{\"detections\": [oops"));
        assert!(matches!(outcome, SideChannel::Malformed(_)));
    }

    #[test]
    fn non_utf8_header_is_malformed() {
        let outcome = decode(Some(&[0xff, 0xfe, 0x00]));
        assert!(matches!(outcome, SideChannel::Malformed(_)));
    }

    #[test]
    fn decoded_header_yields_detections_in_order() {
        let raw = br#"{"detections":[
            {"x1":0,"y1":0,"x2":1,"y2":1,"confidence":0.8,"class":0,"class_name":"Whiteheads"},
            {"x1":2,"y1":2,"x2":3,"y2":3,"confidence":0.7,"class":1,"class_name":"Blackheads"}
        ]}"#;
        let detections = match decode(Some(raw)) {
            SideChannel::Decoded(detections) => detections,
            other => panic!("expected a decoded list, got {other:?}"),
        };
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].class_name, "Whiteheads");
        assert_eq!(detections[1].class_name, "Blackheads");
    }

    #[test]
    fn empty_list_decodes_but_yields_nothing() {
        let outcome = decode(Some(br#"{"detections":[]}"#));
        assert!(matches!(outcome, SideChannel::Decoded(ref d) if d.is_empty()));
    }

    #[test]
    fn object_without_detections_field_yields_nothing() {
        let outcome = decode(Some(br#"{"note":"no detections key"}"#));
        assert!(matches!(outcome, SideChannel::Decoded(ref d) if d.is_empty()));
    }
}
