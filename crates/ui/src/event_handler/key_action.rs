/// Actions that can be triggered by terminal events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Toggle button activated
    Open,
    /// Modal dismissed
    Close,
    /// Commit the composed text
    Submit,
    /// Move to another persona tab
    CycleVariation { steps: i8 },
    /// Leave the application
    Exit,
}
