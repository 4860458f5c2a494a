//! C type model and function signature parsing.
//!
//! Covers the declarations cbridge emits: arithmetic types, stdint aliases,
//! pointers, const qualifiers, and named (generated) structure types. Function
//! pointers, arrays, and variadic signatures are out of scope.

use crate::error::{CodegenError, Result};

/// A C type as it appears in generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CType {
    Void,
    Char,
    SignedChar,
    UnsignedChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Float,
    Double,
    LongDouble,
    Bool,
    SizeT,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    /// Pointer to another type.
    Pointer(Box<CType>),
    /// Const-qualified type.
    Const(Box<CType>),
    /// A user-defined or generated type, spelled literally (e.g. "ByteArray",
    /// "struct Vertex").
    Named(String),
}

impl CType {
    /// Parse a bare type spelling like `"unsigned long"` or `"Color *"`.
    pub fn parse(input: &str) -> Result<Self> {
        let mut cursor = Cursor::new(input);
        let (ctype, name) = cursor.declarator()?;
        if let Some(name) = name {
            return Err(malformed(format!("unexpected token '{name}' after type")));
        }
        Ok(ctype)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, CType::Void)
    }

    /// The canonical spelling of a builtin type, if this is one.
    fn keyword(&self) -> Option<&'static str> {
        let kw = match self {
            CType::Void => "void",
            CType::Char => "char",
            CType::SignedChar => "signed char",
            CType::UnsignedChar => "unsigned char",
            CType::Short => "short",
            CType::UnsignedShort => "unsigned short",
            CType::Int => "int",
            CType::UnsignedInt => "unsigned int",
            CType::Long => "long",
            CType::UnsignedLong => "unsigned long",
            CType::LongLong => "long long",
            CType::UnsignedLongLong => "unsigned long long",
            CType::Float => "float",
            CType::Double => "double",
            CType::LongDouble => "long double",
            CType::Bool => "_Bool",
            CType::SizeT => "size_t",
            CType::Int8 => "int8_t",
            CType::Int16 => "int16_t",
            CType::Int32 => "int32_t",
            CType::Int64 => "int64_t",
            CType::UInt8 => "uint8_t",
            CType::UInt16 => "uint16_t",
            CType::UInt32 => "uint32_t",
            CType::UInt64 => "uint64_t",
            _ => return None,
        };
        Some(kw)
    }
}

impl std::fmt::Display for CType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CType::Pointer(inner) => write!(f, "{inner} *"),
            CType::Const(inner) => write!(f, "{inner} const"),
            CType::Named(name) => f.write_str(name),
            builtin => f.write_str(builtin.keyword().unwrap_or("void")),
        }
    }
}

/// A parsed function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CParam {
    pub ctype: CType,
    /// Empty if the parameter is unnamed.
    pub name: String,
}

/// A parsed C function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSignature {
    pub return_type: CType,
    pub name: String,
    pub params: Vec<CParam>,
}

impl CSignature {
    /// Parse a signature string like `"Color sample(Vertex mesh, float s)"`.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim().trim_end_matches(';').trim_end();
        if input.is_empty() {
            return Err(malformed("empty signature"));
        }

        let open = input.find('(').ok_or_else(|| malformed("missing '('"))?;
        let close = input.rfind(')').ok_or_else(|| malformed("missing ')'"))?;
        if close != input.len() - 1 || close < open {
            return Err(malformed("text after ')'"));
        }

        let mut head = Cursor::new(&input[..open]);
        let (return_type, name) = head.declarator()?;
        head.finish()?;
        let name = name.ok_or_else(|| malformed("missing function name"))?;

        let params = parse_params(&input[open + 1..close])?;

        Ok(CSignature {
            return_type,
            name,
            params,
        })
    }
}

impl std::fmt::Display for CSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param.ctype)?;
            if !param.name.is_empty() {
                write!(f, " {}", param.name)?;
            }
        }
        write!(f, ")")
    }
}

fn malformed(detail: impl Into<String>) -> CodegenError {
    CodegenError::InvalidSignature {
        detail: detail.into(),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Token cursor over one declarator fragment. `*` is its own token; everything
/// else splits on whitespace.
struct Cursor<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(fragment: &'a str) -> Self {
        let mut tokens = Vec::new();
        for word in fragment.split_whitespace() {
            let mut rest = word;
            while let Some(star) = rest.find('*') {
                if star > 0 {
                    tokens.push(&rest[..star]);
                }
                tokens.push("*");
                rest = &rest[star + 1..];
            }
            if !rest.is_empty() {
                tokens.push(rest);
            }
        }
        Cursor { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<&'a str> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, tok: &str) -> bool {
        if self.peek() == Some(tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn finish(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(tok) => Err(malformed(format!("unexpected token '{tok}'"))),
        }
    }

    /// Parse `[const] base-type *... [name]`.
    fn declarator(&mut self) -> Result<(CType, Option<String>)> {
        let qualified = self.eat("const");
        let mut ctype = self.base_type()?;
        if qualified || self.eat("const") {
            ctype = CType::Const(Box::new(ctype));
        }

        let mut name = None;
        while let Some(tok) = self.peek() {
            match tok {
                "*" => {
                    self.pos += 1;
                    ctype = CType::Pointer(Box::new(ctype));
                }
                // `T * const p` — qualifier on the pointer itself; no distinct
                // representation needed for emission purposes.
                "const" => {
                    self.pos += 1;
                }
                tok if is_identifier(tok) && name.is_none() => {
                    self.pos += 1;
                    name = Some(tok.to_string());
                }
                tok => return Err(malformed(format!("unexpected token '{tok}'"))),
            }
        }

        Ok((ctype, name))
    }

    fn base_type(&mut self) -> Result<CType> {
        let first = self
            .bump()
            .ok_or_else(|| malformed("expected a type"))?;

        let ctype = match first {
            "void" => CType::Void,
            "char" => CType::Char,
            "short" => CType::Short,
            "int" => CType::Int,
            "float" => CType::Float,
            "double" => CType::Double,
            "_Bool" | "bool" => CType::Bool,
            "size_t" => CType::SizeT,
            "int8_t" => CType::Int8,
            "int16_t" => CType::Int16,
            "int32_t" => CType::Int32,
            "int64_t" => CType::Int64,
            "uint8_t" => CType::UInt8,
            "uint16_t" => CType::UInt16,
            "uint32_t" => CType::UInt32,
            "uint64_t" => CType::UInt64,
            "long" => {
                if self.eat("long") {
                    CType::LongLong
                } else if self.eat("double") {
                    CType::LongDouble
                } else {
                    CType::Long
                }
            }
            "signed" => match self.peek() {
                Some("char") => {
                    self.pos += 1;
                    CType::SignedChar
                }
                Some("short") => {
                    self.pos += 1;
                    CType::Short
                }
                Some("int") => {
                    self.pos += 1;
                    CType::Int
                }
                Some("long") => {
                    self.pos += 1;
                    if self.eat("long") {
                        CType::LongLong
                    } else {
                        CType::Long
                    }
                }
                _ => CType::Int,
            },
            "unsigned" => match self.peek() {
                Some("char") => {
                    self.pos += 1;
                    CType::UnsignedChar
                }
                Some("short") => {
                    self.pos += 1;
                    CType::UnsignedShort
                }
                Some("int") => {
                    self.pos += 1;
                    CType::UnsignedInt
                }
                Some("long") => {
                    self.pos += 1;
                    if self.eat("long") {
                        CType::UnsignedLongLong
                    } else {
                        CType::UnsignedLong
                    }
                }
                _ => CType::UnsignedInt,
            },
            "struct" => {
                let tag = self
                    .bump()
                    .filter(|t| is_identifier(t))
                    .ok_or_else(|| malformed("expected struct tag"))?;
                CType::Named(format!("struct {tag}"))
            }
            other if is_identifier(other) => CType::Named(other.to_string()),
            other => return Err(malformed(format!("unknown type '{other}'"))),
        };

        Ok(ctype)
    }
}

/// Parse the parameter list between `(` and `)`.
fn parse_params(list: &str) -> Result<Vec<CParam>> {
    let list = list.trim();
    if list.is_empty() || list == "void" {
        return Ok(Vec::new());
    }

    let mut params = Vec::new();
    for part in list.split(',') {
        let mut cursor = Cursor::new(part);
        let (ctype, name) = cursor.declarator()?;
        params.push(CParam {
            ctype,
            name: name.unwrap_or_default(),
        });
    }
    Ok(params)
}
