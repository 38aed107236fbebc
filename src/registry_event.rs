/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// The `Created` / `Reused` pair is the interesting one: together they show
/// whether an acquisition ran the constructor or short-circuited to the
/// stored instance.
///
/// # Examples
///
/// ```rust
/// use lazy_registry::RegistryEvent;
///
/// let event = RegistryEvent::Created { type_name: "i32" };
/// println!("{}", event);
/// ```
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    /// An acquisition found no stored instance and ran the constructor.
    Created {
        /// The type name of the constructed instance (e.g., "i32", "alloc::string::String")
        type_name: &'static str,
    },

    /// An acquisition found a stored instance and skipped the constructor.
    Reused {
        /// The type name of the reused instance
        type_name: &'static str,
    },

    /// A value was requested without a constructor (`get` / `get_cloned`).
    Get {
        /// The type name that was requested
        type_name: &'static str,
        /// Whether the instance was found in the registry
        found: bool,
    },

    /// A type existence check was performed.
    Contains {
        /// The type name that was checked
        type_name: &'static str,
        /// Whether the type exists in the registry
        found: bool,
    },

    /// A stored instance was overridden via `replace` / `replace_arc`.
    Replaced {
        /// The type name of the replaced instance
        type_name: &'static str,
    },

    /// The registry was reset to its empty state.
    Reset {},
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Created { type_name } => {
                write!(f, "created {{ type_name: {} }}", type_name)
            }
            RegistryEvent::Reused { type_name } => {
                write!(f, "reused {{ type_name: {} }}", type_name)
            }
            RegistryEvent::Get { type_name, found } => {
                write!(f, "get {{ type_name: {}, found: {} }}", type_name, found)
            }
            RegistryEvent::Contains { type_name, found } => {
                write!(
                    f,
                    "contains {{ type_name: {}, found: {} }}",
                    type_name, found
                )
            }
            RegistryEvent::Replaced { type_name } => {
                write!(f, "replaced {{ type_name: {} }}", type_name)
            }
            RegistryEvent::Reset {} => write!(f, "Resetting the Registry"),
        }
    }
}
