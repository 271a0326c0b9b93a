use std::ops::Range;

use logos::Logos;

use crate::{
    directive::Directive,
    emit::{self, Record, Resolved},
    encoder,
    error::AsmError,
    lexer::Token,
    symbols::SymbolTable,
    Options,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Raw numeral token; `""` when the operand was left out.
    Num(String),
    Label(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Register(String),
    Imm(Value),
    /// `displacement(%reg)`
    Mem(Value, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inst {
    pub op: Token,
    pub name: String,
    pub args: Vec<Operand>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Directive(Directive),
    Inst(Inst),
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub label: Option<String>,
    pub body: Body,
}

type Lexeme<'a> = (Result<Token, ()>, &'a str);

fn lex(text: &str) -> Vec<Lexeme<'_>> {
    Token::lexer(text)
        .spanned()
        .map(|(tok, span): (_, Range<usize>)| (tok, &text[span]))
        .collect()
}

fn lower_value(group: &[(Token, &str)]) -> Option<Value> {
    match group {
        [] => Some(Value::Num(String::new())),
        [(Token::Number(n), _)] => Some(Value::Num(n.clone())),
        [(tok, text)] if tok.is_word() => Some(Value::Label(text.to_string())),
        _ => None,
    }
}

fn lower_operand(group: &[(Token, &str)]) -> Option<Operand> {
    match group {
        [(Token::Reg(r), _)] => Some(Operand::Register(r.clone())),
        [disp @ .., (Token::LParen, _), (Token::Reg(r), _), (Token::RParen, _)] => {
            Some(Operand::Mem(lower_value(disp)?, r.clone()))
        }
        _ => lower_value(group).map(Operand::Imm),
    }
}

fn lower_args(name: &str, rest: &[Lexeme<'_>]) -> Result<Vec<Operand>, AsmError> {
    let bad = || AsmError::BadOperands(name.to_string());
    let toks = rest
        .iter()
        .map(|(tok, text)| tok.clone().map(|t| (t, *text)))
        .collect::<Result<Vec<_>, ()>>()
        .map_err(|_| bad())?;
    if toks.is_empty() {
        return Ok(Vec::new());
    }
    toks.split(|(t, _)| *t == Token::Comma)
        .map(|group| lower_operand(group).ok_or_else(bad))
        .collect()
}

/// Classify one source line. The line is trimmed and lowercased; a leading
/// `name:` becomes the label and the remainder is matched as a directive,
/// then as an instruction. Anything else is [`Body::Unrecognized`].
pub fn classify(src: &str) -> Result<Line, AsmError> {
    let text = src.trim().to_lowercase();
    let lexemes = lex(&text);

    let (label, rest) = match lexemes.as_slice() {
        [(Ok(tok), name), (Ok(Token::Colon), _), rest @ ..] if tok.is_word() => {
            (Some(name.to_string()), rest)
        }
        all => (None, all),
    };

    let body = match rest {
        [] => Body::Empty,
        [(Ok(head), name), args @ ..] if head.is_directive() => {
            let arg = match args {
                [(Ok(Token::Number(n)), _)] => n.clone(),
                _ => return Err(AsmError::BadOperands(name.to_string())),
            };
            Body::Directive(match head {
                Token::Pos   => Directive::Pos(arg),
                Token::Align => Directive::Align(arg),
                Token::Long  => Directive::Long(arg),
                _            => Directive::Quad(arg),
            })
        }
        [(Ok(head), name), args @ ..] if head.is_mnemonic() => Body::Inst(Inst {
            op: head.clone(),
            name: name.to_string(),
            args: lower_args(name, args)?,
        }),
        _ => Body::Unrecognized,
    };

    Ok(Line { label, body })
}

pub struct FirstPassResult {
    pub symbols: SymbolTable,
    pub records: Vec<Record>,
}

/// Scan every line once: bind labels, apply directives and encode
/// instructions, leaving label operands pending.
pub fn first_pass<I, S>(lines: I, opts: &Options) -> Result<FirstPassResult, AsmError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pc: u32 = 0;
    let mut symbols = SymbolTable::new();
    let mut records = Vec::<Record>::new();

    for (idx, src) in lines.into_iter().enumerate() {
        let lineno = idx + 1;
        let src = src.as_ref();
        let line = classify(src).map_err(|e| e.at(lineno))?;
        tracing::trace!(line = lineno, pc, body = ?line.body, "classified");

        if let Some(name) = &line.label {
            symbols.define(name, pc).map_err(|e| e.at(lineno))?;
        }

        let fields = match &line.body {
            Body::Empty => None,
            Body::Directive(dir) => dir.eval(&mut pc).map_err(|e| e.at(lineno))?,
            Body::Inst(inst) => Some(encoder::encode(inst).map_err(|e| e.at(lineno))?),
            Body::Unrecognized => {
                if opts.strict {
                    return Err(AsmError::UnrecognizedLine(src.trim().to_string()).at(lineno));
                }
                tracing::warn!(line = lineno, "skipping unrecognized line: {}", src.trim());
                None
            }
        };

        if let Some(fields) = fields {
            let rec = Record { line: lineno, addr: pc, fields };
            tracing::trace!(line = lineno, "0x{:X}: {}", rec.addr, rec);
            pc = pc.checked_add(rec.len()).ok_or(AsmError::Overflow.at(lineno))?;
            records.push(rec);
        }
    }

    tracing::debug!(records = records.len(), symbols = symbols.len(), "first pass done");
    Ok(FirstPassResult { symbols, records })
}

/// Resolve pending label references against the finished symbol table.
pub fn second_pass(pass1: &FirstPassResult, opts: &Options) -> Result<Vec<Resolved>, AsmError> {
    if opts.check_overlap {
        emit::check_overlaps(&pass1.records)?;
    }
    let resolved = emit::resolve(&pass1.records, &pass1.symbols)?;
    tracing::debug!(records = resolved.len(), "second pass done");
    Ok(resolved)
}
