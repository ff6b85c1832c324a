//! Static classification of reserved identifiers and operator characters.
//!
//! Three disjoint tables, all matched case-insensitively (callers fold names
//! to lowercase first): system constants, command names, and display/delete
//! target keywords. A fourth table pairs every operator character with the
//! one-line description printed by `display operators`.

/// Bit flag selecting the system-constant listing.
pub const DISP_SYS: u8 = 1;
/// Bit flag selecting the user-variable listing.
pub const DISP_USER: u8 = 2;
/// Bit flag selecting both listings.
pub const DISP_ALL: u8 = 4;
/// Bit flag selecting the operator listing.
pub const DISP_OP: u8 = 8;

/// The predefined, read-only named values and their exact literals.
pub const SYSTEM_CONSTANTS: [(&str, f64); 4] = [("e", 2.718_281_828_459_045),
                                                ("g", 9.806_65),
                                                ("phi", 1.618_033_988_7),
                                                ("pi", 3.141_592_653_5)];

/// Valid targets for `display` and `delete`, in flag order.
pub const OPTIONS: [&str; 4] = ["sysvars", "uvars", "all", "operators"];

/// Every accepted operator character with its description.
pub const OPERATORS: [(char, &str); 10] = [('(', "Open parenthesis"),
                                           (')', "Close parenthesis"),
                                           (';', "End of statement"),
                                           ('=', "Assign a user variable"),
                                           ('+', "Add"),
                                           ('-', "Subtract or negate"),
                                           ('*', "Multiply"),
                                           ('/', "Divide"),
                                           ('%', "Modulo"),
                                           ('^', "Raise to a power")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The session commands a reserved identifier can resolve to.
pub enum Command {
    Quit,
    Help,
    Display,
    Delete,
}

/// Resolves a lowercase identifier against the command set.
#[must_use]
pub fn lookup_command(name: &str) -> Option<Command> {
    match name {
        "q" | "quit" => Some(Command::Quit),
        "help" => Some(Command::Help),
        "display" => Some(Command::Display),
        "delete" => Some(Command::Delete),
        _ => None,
    }
}

/// Resolves a lowercase identifier against the system-constant table.
///
/// # Example
/// ```
/// use reckon::interpreter::reserved::system_constant;
///
/// assert_eq!(system_constant("pi"), Some(3.1415926535));
/// assert_eq!(system_constant("tau"), None);
/// ```
#[must_use]
pub fn system_constant(name: &str) -> Option<f64> {
    SYSTEM_CONSTANTS.iter()
                    .find(|(constant, _)| *constant == name)
                    .map(|(_, value)| *value)
}

/// Resolves a lowercase identifier against the target-keyword table.
///
/// The flag is `1 << position`, so a single numeric payload identifies the
/// selected target.
///
/// # Example
/// ```
/// use reckon::interpreter::reserved::{option_flag, DISP_USER};
///
/// assert_eq!(option_flag("uvars"), Some(DISP_USER));
/// assert_eq!(option_flag("everything"), None);
/// ```
#[must_use]
pub fn option_flag(name: &str) -> Option<u8> {
    OPTIONS.iter()
           .position(|option| *option == name)
           .map(|index| 1 << index)
}

/// True when `ch` is a member of the operator set.
#[must_use]
pub fn is_operator(ch: char) -> bool {
    OPERATORS.iter().any(|(operator, _)| *operator == ch)
}
