use syn::{Error, GenericArgument, PathArguments, Result, Type};

/// The collection wrapping a receiver field's element type.
pub(crate) enum Container<'t> {
    Option(&'t Type),
    Vec,
}

impl<'t> Container<'t> {
    /// Classify `Option<T>` and `Vec<T>` field types.
    pub(crate) fn of(ty: &'t Type) -> Result<Self> {
        let expected = || Error::new_spanned(ty, "Field must have an `Option<T>` or `Vec<T>` type.");

        let Type::Path(path) = ty else {
            return Err(expected());
        };

        let segment = path.path.segments.last().ok_or_else(expected)?;

        let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
            return Err(expected());
        };

        let Some(GenericArgument::Type(inner)) = arguments.args.first() else {
            return Err(expected());
        };

        if segment.ident == "Option" {
            Ok(Self::Option(inner))
        } else if segment.ident == "Vec" {
            Ok(Self::Vec)
        } else {
            Err(expected())
        }
    }
}
