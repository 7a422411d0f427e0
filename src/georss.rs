//! Geometries attached to search result entries.
//!
//! The Atom parser hands the first GeoRSS child of an entry to a
//! [`GeometryParser`]. [`GeoRss`] understands the simple GeoRSS encodings
//! and the GML shapes allowed inside `georss:where`; supply your own parser
//! to support anything else.

use crate::access::Document;
use crate::error::Error;
use crate::namespace::ns;
use crate::xmldata::Node;

/// A coordinate pair, in the order given in the document.
pub type Position = (f64, f64);

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Point(Position),
    LineString(Vec<Position>),
    Polygon {
        exterior: Vec<Position>,
        interiors: Vec<Vec<Position>>,
    },
    Envelope {
        lower: Position,
        upper: Position,
    },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub shape: Shape,
    /// The coordinate reference system, when one is named.
    pub srs_name: Option<String>,
}

impl Geometry {
    pub fn new(shape: Shape) -> Self {
        Geometry {
            shape,
            srs_name: None,
        }
    }
}

/// Turns a geometry element into a [`Geometry`].
pub trait GeometryParser {
    fn parse_geometry(&self, document: &Document, node: Node) -> Result<Geometry, Error>;
}

impl<F> GeometryParser for F
where
    F: Fn(&Document, Node) -> Result<Geometry, Error>,
{
    fn parse_geometry(&self, document: &Document, node: Node) -> Result<Geometry, Error> {
        self(document, node)
    }
}

/// Parser for GeoRSS Simple and GeoRSS GML.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoRss;

impl GeometryParser for GeoRss {
    fn parse_geometry(&self, document: &Document, node: Node) -> Result<Geometry, Error> {
        let (namespace, local_name) = document.name(node).unwrap_or_default();
        if namespace != ns::GEORSS {
            return Err(unsupported(namespace, local_name));
        }
        let text = || document.text(node).unwrap_or_default();
        let shape = match local_name {
            "point" => Shape::Point(single(&text())?),
            "line" => Shape::LineString(positions(&text())?),
            "polygon" => Shape::Polygon {
                exterior: positions(&text())?,
                interiors: Vec::new(),
            },
            "box" => {
                let (lower, upper) = pair(&text())?;
                Shape::Envelope { lower, upper }
            }
            "where" => {
                let gml = document
                    .find_in_namespace(node, ns::GML)
                    .ok_or_else(|| Error::InvalidGeometry("empty georss:where".to_string()))?;
                return parse_gml(document, gml);
            }
            _ => return Err(unsupported(namespace, local_name)),
        };
        Ok(Geometry::new(shape))
    }
}

fn parse_gml(document: &Document, node: Node) -> Result<Geometry, Error> {
    let (namespace, local_name) = document.name(node).unwrap_or_default();
    let shape = match local_name {
        "Point" => Shape::Point(single(&required_text(document, node, "pos")?)?),
        "LineString" => Shape::LineString(positions(&required_text(document, node, "posList")?)?),
        "Polygon" => {
            let exterior = document
                .find(node, ns::GML, "exterior")
                .ok_or_else(|| Error::InvalidGeometry("polygon without exterior".to_string()))?;
            let interiors = document
                .find_all(node, ns::GML, "interior")
                .map(|interior| ring(document, interior))
                .collect::<Result<Vec<_>, _>>()?;
            Shape::Polygon {
                exterior: ring(document, exterior)?,
                interiors,
            }
        }
        "Envelope" => Shape::Envelope {
            lower: single(&required_text(document, node, "lowerCorner")?)?,
            upper: single(&required_text(document, node, "upperCorner")?)?,
        },
        _ => return Err(unsupported(namespace, local_name)),
    };
    Ok(Geometry {
        shape,
        srs_name: document.attribute(node, "srsName").map(str::to_string),
    })
}

fn ring(document: &Document, boundary: Node) -> Result<Vec<Position>, Error> {
    let linear_ring = document
        .find(boundary, ns::GML, "LinearRing")
        .ok_or_else(|| Error::InvalidGeometry("boundary without LinearRing".to_string()))?;
    positions(&required_text(document, linear_ring, "posList")?)
}

fn required_text(document: &Document, node: Node, local_name: &str) -> Result<String, Error> {
    document
        .find_text(node, ns::GML, local_name)
        .ok_or_else(|| Error::InvalidGeometry(format!("missing gml:{}", local_name)))
}

fn unsupported(namespace: &str, local_name: &str) -> Error {
    Error::InvalidGeometry(format!("unsupported geometry {{{}}}{}", namespace, local_name))
}

/// Whitespace separated numbers, taken two at a time.
fn positions(text: &str) -> Result<Vec<Position>, Error> {
    let numbers = text
        .split_whitespace()
        .map(|number| {
            number
                .parse::<f64>()
                .map_err(|_| Error::InvalidGeometry(format!("not a coordinate: {:?}", number)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if numbers.is_empty() || numbers.len() % 2 != 0 {
        return Err(Error::InvalidGeometry(format!(
            "expected coordinate pairs: {:?}",
            text
        )));
    }
    Ok(numbers.chunks(2).map(|pair| (pair[0], pair[1])).collect())
}

fn single(text: &str) -> Result<Position, Error> {
    match positions(text)?.as_slice() {
        [position] => Ok(*position),
        _ => Err(Error::InvalidGeometry(format!(
            "expected one coordinate pair: {:?}",
            text
        ))),
    }
}

fn pair(text: &str) -> Result<(Position, Position), Error> {
    match positions(text)?.as_slice() {
        [lower, upper] => Ok((*lower, *upper)),
        _ => Err(Error::InvalidGeometry(format!(
            "expected two coordinate pairs: {:?}",
            text
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    fn parse(xml: &str) -> Result<Geometry, Error> {
        let wrapped = format!(
            r#"<entry xmlns:georss="http://www.georss.org/georss" xmlns:gml="http://www.opengis.net/gml">{}</entry>"#,
            xml
        );
        let document = Document::parse_str(&wrapped).unwrap();
        let node = document
            .find_in_namespace(document.root(), ns::GEORSS)
            .unwrap();
        GeoRss.parse_geometry(&document, node)
    }

    #[test]
    fn test_point() {
        assert_eq!(
            parse("<georss:point>45.256 -71.92</georss:point>").unwrap(),
            Geometry::new(Shape::Point((45.256, -71.92)))
        );
    }

    #[test]
    fn test_line() {
        assert_eq!(
            parse("<georss:line>45.256 -110.45 46.46 -109.48</georss:line>").unwrap(),
            Geometry::new(Shape::LineString(vec![(45.256, -110.45), (46.46, -109.48)]))
        );
    }

    #[test]
    fn test_box() {
        assert_eq!(
            parse("<georss:box>42.943 -71.032 43.039 -69.856</georss:box>").unwrap(),
            Geometry::new(Shape::Envelope {
                lower: (42.943, -71.032),
                upper: (43.039, -69.856)
            })
        );
    }

    #[test]
    fn test_gml_polygon() {
        let geometry = parse(
            r#"<georss:where>
                 <gml:Polygon srsName="EPSG:4326">
                   <gml:exterior><gml:LinearRing><gml:posList>0 0 0 10 10 10 0 0</gml:posList></gml:LinearRing></gml:exterior>
                   <gml:interior><gml:LinearRing><gml:posList>1 1 1 2 2 2 1 1</gml:posList></gml:LinearRing></gml:interior>
                 </gml:Polygon>
               </georss:where>"#,
        )
        .unwrap();
        assert_eq!(geometry.srs_name.as_deref(), Some("EPSG:4326"));
        assert_eq!(
            geometry.shape,
            Shape::Polygon {
                exterior: vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (0.0, 0.0)],
                interiors: vec![vec![(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (1.0, 1.0)]],
            }
        );
    }

    #[test]
    fn test_gml_point_and_envelope() {
        assert_eq!(
            parse("<georss:where><gml:Point><gml:pos>1.5 2.5</gml:pos></gml:Point></georss:where>")
                .unwrap(),
            Geometry::new(Shape::Point((1.5, 2.5)))
        );
        assert_eq!(
            parse(
                "<georss:where><gml:Envelope><gml:lowerCorner>1 2</gml:lowerCorner><gml:upperCorner>3 4</gml:upperCorner></gml:Envelope></georss:where>"
            )
            .unwrap()
            .shape,
            Shape::Envelope {
                lower: (1.0, 2.0),
                upper: (3.0, 4.0)
            }
        );
    }

    #[rstest]
    #[case("<georss:point>45.256</georss:point>")]
    #[case("<georss:point>north west</georss:point>")]
    #[case("<georss:point>1 2 3 4</georss:point>")]
    #[case("<georss:box>1 2</georss:box>")]
    #[case("<georss:circle>1 2 3</georss:circle>")]
    #[case("<georss:where/>")]
    #[case("<georss:where><gml:Curve/></georss:where>")]
    #[case("<georss:where><gml:Polygon/></georss:where>")]
    fn test_invalid(#[case] xml: &str) {
        assert_eq!(parse(xml).unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn test_closure_parser() {
        let document =
            Document::parse_str(r#"<p xmlns="http://www.georss.org/georss">x</p>"#).unwrap();
        let parser =
            |_: &Document, _: Node| Ok::<_, Error>(Geometry::new(Shape::Point((0.0, 0.0))));
        assert_eq!(
            parser.parse_geometry(&document, document.root()).unwrap(),
            Geometry::new(Shape::Point((0.0, 0.0)))
        );
    }
}
