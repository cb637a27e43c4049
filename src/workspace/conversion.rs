use super::definition::Workspace;
use crate::error::WorkspaceConversionError;

/// A trait for custom block formats that can be converted into a Tsumiki `Workspace`.
///
/// Editors persist their programs in many shapes. Implement this on your own
/// structs to translate them into the canonical block model the generator reads.
///
/// # Example
///
/// ```rust,no_run
/// use tsumiki::prelude::*;
/// use tsumiki::error::WorkspaceConversionError;
///
/// struct MyStatement { kind: String, text: String }
/// struct MyProgram { statements: Vec<MyStatement> }
///
/// impl IntoWorkspace for MyProgram {
///     fn into_workspace(self) -> std::result::Result<Workspace, WorkspaceConversionError> {
///         let mut head: Option<Block> = None;
///         for (i, stmt) in self.statements.into_iter().enumerate().rev() {
///             let mut block = Block::new(&i.to_string(), &stmt.kind)
///                 .with_field("TEXT", stmt.text);
///             if let Some(next) = head.take() {
///                 block = block.with_next(next);
///             }
///             head = Some(block);
///         }
///         Ok(Workspace { blocks: head.into_iter().collect(), variables: vec![] })
///     }
/// }
/// ```
pub trait IntoWorkspace {
    /// Consumes the object and converts it into a workspace graph.
    fn into_workspace(self) -> Result<Workspace, WorkspaceConversionError>;
}

impl IntoWorkspace for Workspace {
    fn into_workspace(self) -> Result<Workspace, WorkspaceConversionError> {
        Ok(self)
    }
}
