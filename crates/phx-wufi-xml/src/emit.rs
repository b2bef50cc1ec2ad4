//! Recursive emitter that walks schemas and writes indented XML.

use std::io;

use log::debug;
use phx::model::project::PhxProject;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Result, XmlError};
use crate::schema::SchemaTable;
use crate::writable::{Attr, Entity, Writable};

pub const ROOT_ELEMENT: &str = "WUFIplusProject";

const INDENT: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct Emitter {
    table: SchemaTable,
}

impl Emitter {
    pub fn new(table: SchemaTable) -> Self {
        Self { table }
    }

    /// Full document: declaration, then `entity` written as `root` with its
    /// own schema or `schema` when given. Ends with a newline.
    pub fn document(
        &self,
        root: &'static str,
        entity: Entity<'_>,
        schema: Option<&'static str>,
    ) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let root = Writable::Object {
            name: root,
            entity,
            schema,
            attr: None,
        };
        self.write(&mut writer, &root)?;
        let mut xml = String::from_utf8(writer.into_inner())?;
        xml.push('\n');
        Ok(xml)
    }

    /// A single writable without declaration.
    pub fn fragment(&self, item: &Writable<'_>) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
        self.write(&mut writer, item)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn children<'a>(
        &self,
        entity: &Entity<'a>,
        schema: Option<&'static str>,
    ) -> Result<Vec<Writable<'a>>> {
        let key = schema.unwrap_or_else(|| entity.type_name());
        let Some(schema_fn) = self.table.get(key) else {
            return Err(XmlError::SchemaNotFound {
                entity: entity.type_name(),
                key: key.to_string(),
            });
        };
        schema_fn(entity)
    }

    fn write<W: io::Write>(&self, writer: &mut Writer<W>, item: &Writable<'_>) -> Result<()> {
        let start = start_tag(item.name(), item.attr());
        match item {
            Writable::Node { value, .. } => {
                let text = value.render();
                if text.is_empty() {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    writer.write_event(Event::Text(BytesText::new(&text)))?;
                    writer.write_event(Event::End(BytesEnd::new(item.name())))?;
                }
            }
            Writable::List { items, .. } => {
                self.write_element(writer, start, item.name(), items)?;
            }
            Writable::Object { entity, schema, .. } => {
                let children = self.children(entity, *schema)?;
                self.write_element(writer, start, item.name(), &children)?;
            }
        }
        Ok(())
    }

    fn write_element<W: io::Write>(
        &self,
        writer: &mut Writer<W>,
        start: BytesStart<'_>,
        name: &str,
        children: &[Writable<'_>],
    ) -> Result<()> {
        if children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        writer.write_event(Event::Start(start))?;
        for child in children {
            self.write(writer, child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }
}

fn start_tag<'n>(name: &'n str, attr: Option<&Attr>) -> BytesStart<'n> {
    let mut start = BytesStart::new(name);
    if let Some(attr) = attr {
        start.push_attribute((attr.name, attr.value.as_str()));
    }
    start
}

/// Serialize a whole project as a WUFI-Passive XML document.
pub fn project_to_xml_string(project: &PhxProject) -> Result<String> {
    debug!(
        "Writing {} variant(s) to {}",
        project.variants.len(),
        ROOT_ELEMENT
    );
    Emitter::default().document(ROOT_ELEMENT, Entity::Project(project), None)
}

#[cfg(test)]
mod tests {
    use phx::model::geometry::{PhxPolygon, PhxVertex};

    use super::*;
    use crate::writable::{list, node, object, object_as};

    fn triangle() -> (Vec<PhxVertex>, PhxPolygon) {
        let vertices = vec![
            PhxVertex { id_num: 1, x: 0.0, y: 0.0, z: 0.0 },
            PhxVertex { id_num: 2, x: 1.5, y: 0.0, z: 0.0 },
            PhxVertex { id_num: 3, x: 0.0, y: 2.0, z: 0.0 },
        ];
        let polygon = PhxPolygon {
            id_num: 7,
            display_name: "tri".to_string(),
            normal_vector: glam::DVec3::new(0.0, 0.0, 1.0),
            vertices: vertices.clone(),
            child_polygon_ids: Vec::new(),
        };
        (vertices, polygon)
    }

    #[test]
    fn polygon_fragment() {
        let (_, polygon) = triangle();
        let xml = Emitter::default()
            .fragment(&object("Polygon", Entity::Polygon(&polygon)))
            .unwrap();
        insta::assert_snapshot!(xml, @r#"
        <Polygon>
          <IdentNr>7</IdentNr>
          <NormalVectorX>0.0</NormalVectorX>
          <NormalVectorY>0.0</NormalVectorY>
          <NormalVectorZ>1.0</NormalVectorZ>
          <IdentNrPoints count="3">
            <IdentNr index="0">1</IdentNr>
            <IdentNr index="1">2</IdentNr>
            <IdentNr index="2">3</IdentNr>
          </IdentNrPoints>
          <IdentNrPolygonsInside count="0"/>
        </Polygon>
        "#);
    }

    #[test]
    fn vertex_list_fragment() {
        let (vertices, _) = triangle();
        let items = vertices.iter().map(|v| object("Vertix", Entity::Vertex(v)));
        let xml = Emitter::default()
            .fragment(&list("Vertices", items.take(1)))
            .unwrap();
        insta::assert_snapshot!(xml, @r#"
        <Vertices count="1">
          <Vertix index="0">
            <IdentNr>1</IdentNr>
            <X>0.0</X>
            <Y>0.0</Y>
            <Z>0.0</Z>
          </Vertix>
        </Vertices>
        "#);
    }

    #[test]
    fn text_is_escaped_and_empty_text_self_closes() {
        let xml = Emitter::default()
            .fragment(&list("Names", [node("Name", "A & B <1>"), node("Name", "")]))
            .unwrap();
        assert!(xml.contains("A &amp; B &lt;1&gt;"));
        assert!(xml.contains(r#"<Name index="1"/>"#));
    }

    #[test]
    fn unknown_override_key_is_reported() {
        let (vertices, _) = triangle();
        let err = Emitter::default()
            .fragment(&object_as("Odd", Entity::Vertex(&vertices[0]), "PhxVertex_Odd"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "No XML schema 'PhxVertex_Odd' for entity 'PhxVertex'"
        );
    }
}
