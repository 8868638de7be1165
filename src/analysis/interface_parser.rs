use super::parse_error::{ParseError, ParseResult};
use super::tokenizer::{tokenize, Spanned, Token};

/// Type annotation of an interface member, reduced to the shapes the generator distinguishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Tag`, `Types.ObjectId`, `Record<string, Tag>`
    Reference { name: String, args: Vec<TypeExpr> },
    /// Primitive keyword as written: `string`, `number`, `boolean`, ...
    Keyword(String),
    /// `T[]`
    Array(Box<TypeExpr>),
    /// `{ a: string }`
    ObjectLiteral,
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    Tuple,
    /// Function types and method signatures
    Function,
    /// String, number, boolean and template literal types
    Literal(String),
    /// `keyof T`, `typeof x`, indexed access, conditional types
    Other,
}

/// Named member of an interface body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceMember {
    pub name: String,
    pub type_signature: TypeExpr,
    pub optional: bool,
    pub readonly: bool,
}

/// Extracts the members of the first interface declared in a source file
pub trait InterfaceMemberExtractor {
    /// `Ok(None)` when the source declares no interface at all
    fn parse(&self, source: &str) -> ParseResult<Option<ParsedInterface>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInterface {
    pub name: String,
    pub members: Vec<InterfaceMember>,
}

const PRIMITIVE_KEYWORDS: &[&str] = &[
    "string",
    "number",
    "boolean",
    "any",
    "unknown",
    "object",
    "bigint",
    "symbol",
    "null",
    "undefined",
    "void",
    "never",
];

pub fn is_primitive_keyword(name: &str) -> bool {
    PRIMITIVE_KEYWORDS.contains(&name)
}

/// Restricted-grammar reader for TypeScript interface declarations.
///
/// Statements other than interfaces are skimmed, not parsed; only delimiter balance is
/// checked for them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptInterfaceParser;

impl TypeScriptInterfaceParser {
    pub fn new() -> Self {
        Self
    }
}

impl InterfaceMemberExtractor for TypeScriptInterfaceParser {
    fn parse(&self, source: &str) -> ParseResult<Option<ParsedInterface>> {
        let tokens = tokenize(source)?;
        check_balance(&tokens, source.len())?;
        let mut parser = Parser::new(source, tokens);
        parser.parse_first_interface()
    }
}

/// Every `(`, `[` and `{` must be closed by its partner, in order
fn check_balance(tokens: &[Spanned<'_>], eof: usize) -> ParseResult<()> {
    let mut stack: Vec<(&Token<'_>, usize)> = Vec::new();
    for (token, span) in tokens {
        match token {
            Token::LParen | Token::LBracket | Token::LBrace => stack.push((token, span.start)),
            Token::RParen | Token::RBracket | Token::RBrace => {
                let expected_open = match token {
                    Token::RParen => Token::LParen,
                    Token::RBracket => Token::LBracket,
                    _ => Token::LBrace,
                };
                match stack.pop() {
                    Some((open, _)) if *open == expected_open => {}
                    Some((open, _)) => {
                        return Err(ParseError::unbalanced(
                            span.start,
                            format!("{} closes {}", token, open),
                        ))
                    }
                    None => {
                        return Err(ParseError::unbalanced(
                            span.start,
                            format!("{} has no opening partner", token),
                        ))
                    }
                }
            }
            _ => {}
        }
    }
    match stack.pop() {
        Some((open, pos)) => Err(ParseError::unbalanced(
            pos.min(eof),
            format!("{} is never closed", open),
        )),
        None => Ok(()),
    }
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Spanned<'src>>,
    pos: usize,
    eof: usize,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, tokens: Vec<Spanned<'src>>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            eof: source.len(),
        }
    }

    /// Skim top-level statements until the first `interface` at depth zero
    fn parse_first_interface(&mut self) -> ParseResult<Option<ParsedInterface>> {
        let mut depth = 0usize;
        while let Some((token, _)) = self.peek() {
            match token {
                Token::LBrace | Token::LParen | Token::LBracket => depth += 1,
                Token::RBrace | Token::RParen | Token::RBracket => {
                    depth = depth.saturating_sub(1)
                }
                Token::Interface if depth == 0 && self.is_declaration_start() => {
                    self.advance();
                    return self.parse_interface_declaration().map(Some);
                }
                _ => {}
            }
            self.advance();
        }
        Ok(None)
    }

    /// `interface` introduces a declaration only when an identifier follows and it is not
    /// used as a property key or member access
    fn is_declaration_start(&self) -> bool {
        let followed_by_name = matches!(self.peek_ahead(1), Some((Token::Ident(_), _)));
        let preceded_by_access = self.pos > 0
            && matches!(self.tokens.get(self.pos - 1), Some((Token::Dot, _)));
        followed_by_name && !preceded_by_access
    }

    fn parse_interface_declaration(&mut self) -> ParseResult<ParsedInterface> {
        let name = self.expect_ident()?;

        if self.check(&Token::LAngle) {
            self.skip_angle_group()?;
        }

        if self.match_token(&Token::Extends) {
            // heritage list: A, B<C>, ns.D
            while !self.check(&Token::LBrace) {
                if self.is_at_end() {
                    return Err(ParseError::unexpected_eof(self.eof));
                }
                if self.check(&Token::LAngle) {
                    self.skip_angle_group()?;
                } else {
                    self.advance();
                }
            }
        }

        self.expect(&Token::LBrace, "'{'")?;
        let mut members = Vec::new();
        loop {
            while self.match_token(&Token::Semicolon) || self.match_token(&Token::Comma) {}
            if self.match_token(&Token::RBrace) {
                break;
            }
            if self.is_at_end() {
                return Err(ParseError::unexpected_eof(self.eof));
            }
            if let Some(member) = self.parse_member()? {
                members.push(member);
            }
        }

        Ok(ParsedInterface { name, members })
    }

    /// Parse one member; index, call and construct signatures yield `None`
    fn parse_member(&mut self) -> ParseResult<Option<InterfaceMember>> {
        let readonly = self.check(&Token::Readonly) && self.next_is_member_name();
        if readonly {
            self.advance();
        }

        match self.peek() {
            Some((Token::LBracket, _)) => {
                // index signature or computed key
                self.skip_balanced()?;
                self.match_token(&Token::Question);
                self.skip_member_tail()?;
                return Ok(None);
            }
            Some((Token::LParen, _)) | Some((Token::LAngle, _)) => {
                self.skip_member_tail()?;
                return Ok(None);
            }
            Some((Token::Ident("new"), _))
                if matches!(
                    self.peek_ahead(1),
                    Some((Token::LParen, _)) | Some((Token::LAngle, _))
                ) =>
            {
                self.advance();
                self.skip_member_tail()?;
                return Ok(None);
            }
            _ => {}
        }

        let name = self.expect_member_name()?;
        let optional = self.match_token(&Token::Question);

        if self.check(&Token::LParen) || self.check(&Token::LAngle) {
            // method signature
            self.skip_member_tail()?;
            return Ok(Some(InterfaceMember {
                name,
                type_signature: TypeExpr::Function,
                optional,
                readonly,
            }));
        }

        let type_signature = if self.match_token(&Token::Colon) {
            self.parse_type()?
        } else if self.at_member_end() {
            // no annotation: implicitly `any`
            TypeExpr::Keyword("any".to_string())
        } else {
            return Err(self.unexpected("':'"));
        };

        if !self.at_member_end() {
            return Err(self.unexpected("';' or '}'"));
        }

        Ok(Some(InterfaceMember {
            name,
            type_signature,
            optional,
            readonly,
        }))
    }

    fn next_is_member_name(&self) -> bool {
        matches!(
            self.peek_ahead(1),
            Some((token, _)) if token.as_name().is_some()
                || matches!(token, Token::String(_) | Token::Number(_) | Token::LBracket)
        )
    }

    fn at_member_end(&self) -> bool {
        match self.peek() {
            None => true,
            Some((Token::Semicolon, _)) | Some((Token::Comma, _)) | Some((Token::RBrace, _)) => {
                true
            }
            // members may be separated by newlines only
            Some((token, _)) => {
                let starts_member = token.as_name().is_some()
                    || matches!(token, Token::String(_) | Token::LBracket | Token::LParen);
                starts_member && self.newline_before_current()
            }
        }
    }

    fn newline_before_current(&self) -> bool {
        let (Some((_, previous)), Some((_, current))) =
            (self.tokens.get(self.pos.wrapping_sub(1)), self.peek())
        else {
            return false;
        };
        self.source
            .get(previous.end..current.start)
            .is_some_and(|gap| gap.contains('\n'))
    }

    /// Skip generics, parameter list and optional return annotation of a signature
    fn skip_member_tail(&mut self) -> ParseResult<()> {
        if self.check(&Token::LAngle) {
            self.skip_angle_group()?;
        }
        if self.check(&Token::LParen) {
            self.skip_balanced()?;
        }
        if self.match_token(&Token::Colon) {
            self.parse_type()?;
        }
        Ok(())
    }

    fn expect_member_name(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some((token, _)) => {
                if let Some(name) = token.as_name() {
                    let name = name.to_string();
                    self.advance();
                    return Ok(name);
                }
                match token {
                    Token::String(s) => {
                        let name = s[1..s.len() - 1].to_string();
                        self.advance();
                        Ok(name)
                    }
                    Token::Number(n) => {
                        let name = n.to_string();
                        self.advance();
                        Ok(name)
                    }
                    _ => Err(self.unexpected("member name")),
                }
            }
            None => Err(ParseError::unexpected_eof(self.eof)),
        }
    }

    // === Types ===

    /// type := ['|'] union ['extends' type '?' type ':' type]
    fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        let checked = self.parse_union()?;
        if self.match_token(&Token::Extends) {
            self.parse_type()?;
            self.expect(&Token::Question, "'?'")?;
            self.parse_type()?;
            self.expect(&Token::Colon, "':'")?;
            self.parse_type()?;
            return Ok(TypeExpr::Other);
        }
        if self.check(&Token::Arrow) {
            // `(a) => b` is handled in primary; a stray arrow here is malformed
            return Err(self.unexpected("type"));
        }
        Ok(checked)
    }

    fn parse_union(&mut self) -> ParseResult<TypeExpr> {
        self.match_token(&Token::Pipe);
        let mut members = vec![self.parse_intersection()?];
        while self.match_token(&Token::Pipe) {
            members.push(self.parse_intersection()?);
        }
        Ok(if members.len() == 1 {
            members.remove(0)
        } else {
            TypeExpr::Union(members)
        })
    }

    fn parse_intersection(&mut self) -> ParseResult<TypeExpr> {
        self.match_token(&Token::Ampersand);
        let mut members = vec![self.parse_postfix()?];
        while self.match_token(&Token::Ampersand) {
            members.push(self.parse_postfix()?);
        }
        Ok(if members.len() == 1 {
            members.remove(0)
        } else {
            TypeExpr::Intersection(members)
        })
    }

    /// primary followed by any number of `[]` or indexed accesses
    fn parse_postfix(&mut self) -> ParseResult<TypeExpr> {
        let mut ty = self.parse_prefix()?;
        while self.check(&Token::LBracket) {
            if matches!(self.peek_ahead(1), Some((Token::RBracket, _))) {
                self.advance();
                self.advance();
                ty = TypeExpr::Array(Box::new(ty));
            } else {
                self.skip_balanced()?;
                ty = TypeExpr::Other;
            }
        }
        Ok(ty)
    }

    fn parse_prefix(&mut self) -> ParseResult<TypeExpr> {
        match self.peek() {
            Some((Token::Keyof, _)) | Some((Token::Typeof, _)) => {
                self.advance();
                self.parse_postfix()?;
                Ok(TypeExpr::Other)
            }
            Some((Token::Readonly, _)) => {
                // `readonly string[]` is still an array
                self.advance();
                self.parse_postfix()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> ParseResult<TypeExpr> {
        let Some((token, _)) = self.peek() else {
            return Err(ParseError::unexpected_eof(self.eof));
        };

        match token {
            Token::Ident(name) => {
                let name = name.to_string();
                self.advance();
                if is_primitive_keyword(&name) {
                    return Ok(TypeExpr::Keyword(name));
                }
                if name == "true" || name == "false" {
                    return Ok(TypeExpr::Literal(name));
                }
                let mut qualified = name;
                while self.check(&Token::Dot) {
                    self.advance();
                    let part = self.expect_ident()?;
                    qualified.push('.');
                    qualified.push_str(&part);
                }
                let args = if self.check(&Token::LAngle) {
                    self.parse_type_arguments()?
                } else {
                    Vec::new()
                };
                Ok(TypeExpr::Reference {
                    name: qualified,
                    args,
                })
            }
            Token::String(s) | Token::Number(s) | Token::Template(s) => {
                let literal = s.to_string();
                self.advance();
                Ok(TypeExpr::Literal(literal))
            }
            Token::Minus => {
                self.advance();
                match self.peek() {
                    Some((Token::Number(n), _)) => {
                        let literal = format!("-{}", n);
                        self.advance();
                        Ok(TypeExpr::Literal(literal))
                    }
                    _ => Err(self.unexpected("number")),
                }
            }
            Token::LBrace => {
                self.skip_balanced()?;
                Ok(TypeExpr::ObjectLiteral)
            }
            Token::LBracket => {
                self.skip_balanced()?;
                Ok(TypeExpr::Tuple)
            }
            Token::LAngle => {
                // generic function type: <T>(x: T) => T
                self.skip_angle_group()?;
                self.parse_parenthesized_or_function()
            }
            Token::LParen => self.parse_parenthesized_or_function(),
            _ => Err(self.unexpected("type")),
        }
    }

    fn parse_parenthesized_or_function(&mut self) -> ParseResult<TypeExpr> {
        let start = self.pos;
        self.skip_balanced()?;
        if self.match_token(&Token::Arrow) {
            self.parse_type()?;
            return Ok(TypeExpr::Function);
        }

        // plain parenthesized type: reparse the inside
        self.pos = start;
        self.expect(&Token::LParen, "'('")?;
        let inner = self.parse_type()?;
        self.expect(&Token::RParen, "')'")?;
        Ok(inner)
    }

    fn parse_type_arguments(&mut self) -> ParseResult<Vec<TypeExpr>> {
        self.expect(&Token::LAngle, "'<'")?;
        let mut args = Vec::new();
        loop {
            args.push(self.parse_type()?);
            if self.match_token(&Token::Comma) {
                continue;
            }
            self.expect(&Token::RAngle, "'>'")?;
            return Ok(args);
        }
    }

    // === Token helpers ===

    /// Skip a `(..)`, `[..]` or `{..}` group including nested groups
    fn skip_balanced(&mut self) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            match self.advance_token() {
                Some(Token::LParen | Token::LBracket | Token::LBrace) => depth += 1,
                Some(Token::RParen | Token::RBracket | Token::RBrace) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(_) if depth == 0 => return Err(self.unexpected_at_previous("'(', '[' or '{'")),
                Some(_) => {}
                None => return Err(ParseError::unexpected_eof(self.eof)),
            }
        }
    }

    /// Skip a `<..>` group; `=>` inside defaults does not close it
    fn skip_angle_group(&mut self) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            match self.advance_token() {
                Some(Token::LAngle) => depth += 1,
                Some(Token::RAngle) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(Token::LBrace | Token::LParen | Token::LBracket) => {
                    self.pos -= 1;
                    self.skip_balanced()?;
                }
                Some(_) if depth == 0 => return Err(self.unexpected_at_previous("'<'")),
                Some(_) => {}
                None => return Err(ParseError::unexpected_eof(self.eof)),
            }
        }
    }

    fn peek(&self) -> Option<&Spanned<'src>> {
        self.tokens.get(self.pos)
    }

    fn peek_ahead(&self, offset: usize) -> Option<&Spanned<'src>> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<&Spanned<'src>> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn advance_token(&mut self) -> Option<Token<'src>> {
        self.advance().map(|(token, _)| token.clone())
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, token: &Token<'_>) -> bool {
        match self.peek() {
            Some((t, _)) => std::mem::discriminant(t) == std::mem::discriminant(token),
            None => false,
        }
    }

    fn match_token(&mut self, token: &Token<'_>) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token<'_>, expected: &str) -> ParseResult<()> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some((Token::Ident(s), _)) => {
                let value = s.to_string();
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some((token, span)) => {
                ParseError::unexpected_token(span.start, expected, token.to_string())
            }
            None => ParseError::unexpected_eof(self.eof),
        }
    }

    fn unexpected_at_previous(&self, expected: &str) -> ParseError {
        match self.tokens.get(self.pos.saturating_sub(1)) {
            Some((token, span)) => {
                ParseError::unexpected_token(span.start, expected, token.to_string())
            }
            None => ParseError::unexpected_eof(self.eof),
        }
    }
}
