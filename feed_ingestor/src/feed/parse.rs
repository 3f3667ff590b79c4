//! XML parsing and query-time extraction.

use chrono::NaiveDateTime;
use roxmltree::{Document, Node};

use crate::errors::ParseError;
use crate::feed::{CityRecord, DomainRecord, FeedTree, PlaceRecord};

/// Layout of the timestamp inside the trailing feed comment.
const QUERY_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Parse raw feed text into a [`FeedTree`].
///
/// The root element's children are domains, their children cities, their
/// children places. Any missing or uninterpretable *required* attribute
/// fails the whole document; callers either get a structurally valid tree
/// or an error, never a partial one.
pub fn parse_feed(raw: &str) -> Result<FeedTree, ParseError> {
    let doc = Document::parse(raw)?;
    let mut domains = Vec::new();

    for domain_node in elements(doc.root_element()) {
        let mut cities = Vec::new();
        for city_node in elements(domain_node) {
            let mut places = Vec::new();
            for place_node in elements(city_node) {
                places.push(parse_place(place_node)?);
            }
            cities.push(parse_city(city_node, places)?);
        }
        domains.push(parse_domain(domain_node, cities)?);
    }

    Ok(FeedTree { domains })
}

/// Extract the feed's query time from the trailing comment.
///
/// The comment has the fixed form `<!-- DD.MM.YYYY HH:MM ... -->`: the
/// timestamp substring runs from 5 bytes after the start of `<!--` to
/// 1 byte before `-->`, which drops the delimiting spaces on both sides.
pub fn extract_query_time(raw: &str) -> Result<NaiveDateTime, ParseError> {
    let start = raw.find("<!--").ok_or(ParseError::QueryTimeMissing)?;
    let end = raw.find("-->").ok_or(ParseError::QueryTimeMissing)?;
    let text = raw
        .get(start + 5..end.wrapping_sub(1))
        .ok_or(ParseError::QueryTimeMissing)?;

    NaiveDateTime::parse_from_str(text, QUERY_TIME_FORMAT).map_err(|source| {
        ParseError::QueryTime {
            text: text.to_string(),
            source,
        }
    })
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn parse_domain(node: Node<'_, '_>, cities: Vec<CityRecord>) -> Result<DomainRecord, ParseError> {
    Ok(DomainRecord {
        code: req_attr(node, "domain")?.to_string(),
        name: req_attr(node, "name")?.to_string(),
        country: req_attr(node, "country")?.to_string(),
        lat: opt_parsed(node, "lat")?,
        lng: opt_parsed(node, "lng")?,
        cities,
    })
}

fn parse_city(node: Node<'_, '_>, places: Vec<PlaceRecord>) -> Result<CityRecord, ParseError> {
    Ok(CityRecord {
        uid: req_parsed(node, "uid")?,
        name: node.attribute("name").map(str::to_string),
        num_places: opt_parsed(node, "num_places")?,
        lat: opt_parsed(node, "lat")?,
        lng: opt_parsed(node, "lng")?,
        places,
    })
}

fn parse_place(node: Node<'_, '_>) -> Result<PlaceRecord, ParseError> {
    // Occupancy is best-effort: feeds occasionally carry decorated counts
    // ("5+"), and a place without a readable count is still a valid place.
    let bikes = node.attribute("bikes").and_then(|v| v.parse().ok());

    Ok(PlaceRecord {
        uid: req_parsed(node, "uid")?,
        number: opt_parsed(node, "number")?,
        spot: parse_spot(node)?,
        name: node.attribute("name").map(str::to_string),
        lat: opt_parsed(node, "lat")?,
        lng: opt_parsed(node, "lng")?,
        terminal_type: node.attribute("terminal_type").map(str::to_string),
        bikes,
    })
}

fn parse_spot(node: Node<'_, '_>) -> Result<Option<bool>, ParseError> {
    match node.attribute("spot") {
        None => Ok(None),
        Some("1") => Ok(Some(true)),
        Some("0") => Ok(Some(false)),
        Some(other) => Err(invalid(node, "spot", other)),
    }
}

fn req_attr<'a>(node: Node<'a, '_>, attr: &str) -> Result<&'a str, ParseError> {
    node.attribute(attr).ok_or_else(|| ParseError::MissingAttr {
        element: node.tag_name().name().to_string(),
        attr: attr.to_string(),
    })
}

fn req_parsed<T: std::str::FromStr>(node: Node<'_, '_>, attr: &str) -> Result<T, ParseError> {
    let value = req_attr(node, attr)?;
    value.parse().map_err(|_| invalid(node, attr, value))
}

fn opt_parsed<T: std::str::FromStr>(
    node: Node<'_, '_>,
    attr: &str,
) -> Result<Option<T>, ParseError> {
    match node.attribute(attr) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| invalid(node, attr, value)),
    }
}

fn invalid(node: Node<'_, '_>, attr: &str, value: &str) -> ParseError {
    ParseError::InvalidAttr {
        element: node.tag_name().name().to_string(),
        attr: attr.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<markers>
  <country domain="de" name="nextbike Germany" country="DE" lat="50.7" lng="10.5">
    <city uid="14" name="Leipzig" num_places="2" lat="51.34" lng="12.37">
      <place uid="5" number="4021" spot="1" name="Augustusplatz" lat="51.338" lng="12.38" terminal_type="sign" bikes="3"/>
      <place uid="6" number="4022" spot="0" name="Hauptbahnhof" lat="51.345" lng="12.381" bikes="5+"/>
    </city>
    <city uid="22" name="Dresden">
      <place uid="7" name="Altmarkt"/>
    </city>
  </country>
</markers>
<!-- 05.03.2021 14:32 -->"#;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn parses_three_level_tree() {
        let tree = parse_feed(SAMPLE).unwrap();
        assert_eq!(tree.domains.len(), 1);

        let domain = &tree.domains[0];
        assert_eq!(domain.code, "de");
        assert_eq!(domain.country, "DE");
        assert_eq!(domain.cities.len(), 2);

        let leipzig = &domain.cities[0];
        assert_eq!(leipzig.uid, 14);
        assert_eq!(leipzig.num_places, Some(2));
        assert_eq!(leipzig.places.len(), 2);
        assert_eq!(leipzig.places[0].spot, Some(true));
        assert_eq!(leipzig.places[0].bikes, Some(3));

        // "5+" is not a clean count and must degrade to None, not error.
        assert_eq!(leipzig.places[1].bikes, None);

        let dresden = &domain.cities[1];
        assert_eq!(dresden.places[0].uid, 7);
        assert_eq!(dresden.places[0].bikes, None);
    }

    #[test]
    fn walk_yields_parents_with_places() {
        let tree = parse_feed(SAMPLE).unwrap();
        assert_eq!(tree.place_count(), 3);

        let pairs: Vec<(i32, i32)> = tree
            .places()
            .map(|p| (p.city.uid, p.place.uid))
            .collect();
        assert_eq!(pairs, vec![(14, 5), (14, 6), (22, 7)]);

        let edges: Vec<(&str, i32)> = tree
            .cities()
            .map(|(d, c)| (d.code.as_str(), c.uid))
            .collect();
        assert_eq!(edges, vec![("de", 14), ("de", 22)]);
    }

    #[test]
    fn missing_uid_fails_whole_document() {
        let raw = r#"<markers><country domain="de" name="x" country="DE">
            <city name="no uid here"/></country></markers>"#;
        let err = parse_feed(raw).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttr { ref attr, .. } if attr == "uid"));
    }

    #[test]
    fn garbage_uid_fails_whole_document() {
        let raw = r#"<markers><country domain="de" name="x" country="DE">
            <city uid="fourteen"/></country></markers>"#;
        let err = parse_feed(raw).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAttr { ref attr, .. } if attr == "uid"));
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        assert!(matches!(
            parse_feed("<markers><country></markers>"),
            Err(ParseError::Xml(_))
        ));
    }

    #[test]
    fn query_time_from_trailing_comment() {
        let t = extract_query_time("... <!-- 05.03.2021 14:32 -->").unwrap();
        assert_eq!(t, ts(2021, 3, 5, 14, 32));
    }

    #[test]
    fn query_time_of_full_sample() {
        let t = extract_query_time(SAMPLE).unwrap();
        assert_eq!(t, ts(2021, 3, 5, 14, 32));
    }

    #[test]
    fn absent_comment_is_reported() {
        assert!(matches!(
            extract_query_time("<markers/>"),
            Err(ParseError::QueryTimeMissing)
        ));
    }

    #[test]
    fn unparsable_comment_time_is_reported() {
        let err = extract_query_time("<!-- yesterday sometime -->").unwrap_err();
        assert!(matches!(err, ParseError::QueryTime { .. }));
    }
}
