//! Known authoring/editing tool catalog
//!
//! Modeled as plain data so new fingerprints extend the table without
//! touching analyzer logic. Matching is case-insensitive substring search
//! over every metadata value.

/// One known tool fingerprint
#[derive(Debug, Clone, Copy)]
pub struct ToolSignature {
    /// Lowercase marker searched for in metadata values
    pub name: &'static str,
    /// What the tool is, for the finding text
    pub description: &'static str,
}

pub static TOOL_CATALOG: &[ToolSignature] = &[
    ToolSignature { name: "itext", description: "iText PDF library, common in programmatic editing" },
    ToolSignature { name: "pikepdf", description: "pikepdf Python library (QPDF bindings)" },
    ToolSignature { name: "pypdf", description: "pypdf/PyPDF2 Python manipulation library" },
    ToolSignature { name: "reportlab", description: "ReportLab Python PDF generator" },
    ToolSignature { name: "ghostscript", description: "Ghostscript converter/re-distiller" },
    ToolSignature { name: "qpdf", description: "QPDF structural transformation tool" },
    ToolSignature { name: "fpdf", description: "FPDF PHP/Python PDF generator" },
    ToolSignature { name: "tcpdf", description: "TCPDF PHP PDF generator" },
    ToolSignature { name: "wkhtmltopdf", description: "wkhtmltopdf HTML-to-PDF converter" },
    ToolSignature { name: "skia", description: "Skia rendering engine (Chrome print-to-PDF)" },
    ToolSignature { name: "cairo", description: "Cairo graphics library PDF backend" },
    ToolSignature { name: "libreoffice", description: "LibreOffice document suite" },
    ToolSignature { name: "openoffice", description: "OpenOffice document suite" },
    ToolSignature { name: "microsoft", description: "Microsoft Office export" },
    ToolSignature { name: "acrobat", description: "Adobe Acrobat editor" },
    ToolSignature { name: "pdfsam", description: "PDFsam split/merge tool" },
    ToolSignature { name: "foxit", description: "Foxit PDF editor" },
    ToolSignature { name: "nitro", description: "Nitro PDF editor" },
    ToolSignature { name: "ilovepdf", description: "iLovePDF online editing service" },
    ToolSignature { name: "smallpdf", description: "Smallpdf online editing service" },
    ToolSignature { name: "sejda", description: "Sejda online PDF editor" },
    ToolSignature { name: "pdf-xchange", description: "PDF-XChange editor" },
    ToolSignature { name: "canva", description: "Canva design export" },
    ToolSignature { name: "prince", description: "Prince HTML-to-PDF formatter" },
];
