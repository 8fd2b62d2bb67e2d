//! Very simple functions for producing KML files specifically suited to this crate and the
//! programs that use it.
//!
//! This is not a general solution at all, only the handful of elements needed to put risk zones
//! on a map. It is a streaming API, so the user is responsible for closing all tags.

use crate::QuakeRiskResult;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use zip::{write::FileOptions, ZipWriter};

pub struct KmlFile {
    out: BufWriter<File>,
    finished: bool,
}

impl KmlFile {
    pub fn new<P: AsRef<Path>>(pth: P) -> QuakeRiskResult<Self> {
        let p = pth.as_ref();

        let f = std::fs::File::create(p)?;
        let mut new = KmlFile {
            out: BufWriter::new(f),
            finished: false,
        };
        new.start_document()?;
        Ok(new)
    }

    /// Close the document and flush it to disk.
    pub fn finish(mut self) -> QuakeRiskResult<()> {
        self.finished = true;
        self.finish_document()?;
        self.out.flush()?;
        Ok(())
    }
}

impl KmlWriter for KmlFile {
    fn output(&mut self) -> &mut dyn Write {
        &mut self.out
    }
}

impl Drop for KmlFile {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.finish_document();
        }
    }
}

/// A KML document compressed into a zip archive.
pub struct KmzFile {
    zip: ZipWriter<File>,
    finished: bool,
}

impl KmzFile {
    pub fn new<P: AsRef<Path>>(pth: P) -> QuakeRiskResult<Self> {
        let p = pth.as_ref();

        let f = std::fs::File::create(p)?;
        let mut zip = ZipWriter::new(f);
        zip.start_file("doc.kml", FileOptions::default())?;

        let mut new = KmzFile {
            zip,
            finished: false,
        };
        new.start_document()?;
        Ok(new)
    }

    /// Close the document and write the archive directory.
    ///
    /// The archive is not readable until this succeeds.
    pub fn finish(mut self) -> QuakeRiskResult<()> {
        self.finished = true;
        self.finish_document()?;
        self.zip.finish()?;
        Ok(())
    }
}

impl KmlWriter for KmzFile {
    fn output(&mut self) -> &mut dyn Write {
        &mut self.zip
    }
}

impl Drop for KmzFile {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        let _ = self.finish_document();
        if let Err(err) = self.zip.finish() {
            log::error!("Error finishing KMZ archive: {}", err);
        }
    }
}

pub trait KmlWriter {
    fn output(&mut self) -> &mut dyn Write;

    /// Start by putting the header out.
    fn start_document(&mut self) -> QuakeRiskResult<()> {
        const HEADER: &str = concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            "\n",
            r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#,
            "\n",
            "<Document>\n"
        );

        self.output().write_all(HEADER.as_bytes())?;

        Ok(())
    }

    /// Close a document.
    fn finish_document(&mut self) -> QuakeRiskResult<()> {
        const FOOTER: &str = concat!(r#"</Document>"#, "\n", r#"</kml>"#, "\n");
        self.output().write_all(FOOTER.as_bytes())?;
        Ok(())
    }

    /// Write a description element to the file.
    fn write_description(&mut self, description: &str) -> QuakeRiskResult<()> {
        writeln!(
            self.output(),
            "<description><![CDATA[{}]]></description>",
            description
        )?;
        Ok(())
    }

    /// Start a KML folder.
    fn start_folder(
        &mut self,
        name: Option<&str>,
        description: Option<&str>,
        is_open: bool,
    ) -> QuakeRiskResult<()> {
        self.output().write_all("<Folder>\n".as_bytes())?;

        if let Some(name) = name {
            writeln!(self.output(), "<name>{}</name>", name)?;
        }

        if let Some(description) = description {
            self.write_description(description)?;
        }

        if is_open {
            self.output().write_all("<open>1</open>\n".as_bytes())?;
        }

        Ok(())
    }

    /// Close out a folder element
    fn finish_folder(&mut self) -> QuakeRiskResult<()> {
        writeln!(self.output(), "</Folder>")?;
        Ok(())
    }

    /// Start a placemark element.
    fn start_placemark(
        &mut self,
        name: Option<&str>,
        description: Option<&str>,
        style_url: Option<&str>,
    ) -> QuakeRiskResult<()> {
        writeln!(self.output(), "<Placemark>")?;

        if let Some(name) = name {
            writeln!(self.output(), "<name>{}</name>", name)?;
        }

        if let Some(description) = description {
            self.write_description(description)?;
        }

        if let Some(style_url) = style_url {
            writeln!(self.output(), "<styleUrl>{}</styleUrl>", style_url)?;
        }

        Ok(())
    }

    /// Close out a placemark element.
    fn finish_placemark(&mut self) -> QuakeRiskResult<()> {
        writeln!(self.output(), "</Placemark>")?;
        Ok(())
    }

    /// Start a style definition.
    fn start_style(&mut self, style_id: Option<&str>) -> QuakeRiskResult<()> {
        if let Some(style_id) = style_id {
            writeln!(self.output(), "<Style id=\"{}\">", style_id)?;
        } else {
            writeln!(self.output(), "<Style>")?;
        }
        Ok(())
    }

    /// Close out a style definition.
    fn finish_style(&mut self) -> QuakeRiskResult<()> {
        writeln!(self.output(), "</Style>")?;
        Ok(())
    }

    /// Create an IconStyle element.
    ///
    /// The color is in the KML aabbggrr format.
    fn create_icon_style(
        &mut self,
        icon_url: Option<&str>,
        color: Option<&str>,
        scale: f64,
    ) -> QuakeRiskResult<()> {
        writeln!(self.output(), "<IconStyle>")?;

        if let Some(color) = color {
            writeln!(self.output(), "<color>{}</color>", color)?;
        }

        if scale > 0.0 {
            writeln!(self.output(), "<scale>{}</scale>", scale)?;
        } else {
            writeln!(self.output(), "<scale>1</scale>")?;
        }

        if let Some(icon_url) = icon_url {
            writeln!(self.output(), "<Icon><href>{}</href></Icon>", icon_url)?;
        }

        writeln!(self.output(), "</IconStyle>")?;
        Ok(())
    }

    /// Write out a KML Point element
    fn create_point(&mut self, lat: f64, lon: f64, z: f64) -> QuakeRiskResult<()> {
        writeln!(
            self.output(),
            "<Point>\n<coordinates>{},{},{}</coordinates>\n</Point>",
            lon,
            lat,
            z
        )?;
        Ok(())
    }
}
