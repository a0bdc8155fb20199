use std::io::Write;

use super::RenderError;

/// Writes the tags closing the table and the document.
pub fn render_footer<W: Write + ?Sized>(out: &mut W) -> Result<(), RenderError> {
    writeln!(out, "  </tbody>")?;
    writeln!(out, " </table>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(())
}
