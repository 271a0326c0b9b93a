use logos::Logos;

/// Tokens of one source line. Lines are lowercased before lexing.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // ── Directives ───────────────────────────
    #[token(".pos")]   Pos,
    #[token(".align")] Align,
    #[token(".long")]  Long,
    #[token(".quad")]  Quad,

    // ── No operand ───────────────────────────
    #[token("halt")] Halt,
    #[token("nop")]  Nop,
    #[token("ret")]  Ret,

    // ── Reg-reg ──────────────────────────────
    #[token("rrmovl")] Rrmovl,
    #[token("cmovle")] Cmovle,
    #[token("cmovl")]  Cmovl,
    #[token("cmove")]  Cmove,
    #[token("cmovne")] Cmovne,
    #[token("cmovge")] Cmovge,
    #[token("cmovg")]  Cmovg,
    #[token("addl")]   Addl,
    #[token("subl")]   Subl,
    #[token("andl")]   Andl,
    #[token("xorl")]   Xorl,

    // ── Moves with a 4-byte field ────────────
    #[token("irmovl")] Irmovl,
    #[token("rmmovl")] Rmmovl,
    #[token("mrmovl")] Mrmovl,

    // ── Branch / call ────────────────────────
    #[token("jmp")]  Jmp,
    #[token("jle")]  Jle,
    #[token("jl")]   Jl,
    #[token("je")]   Je,
    #[token("jne")]  Jne,
    #[token("jge")]  Jge,
    #[token("jg")]   Jg,
    #[token("call")] Call,

    // ── Stack ────────────────────────────────
    #[token("pushl")] Pushl,
    #[token("popl")]  Popl,

    // ── Operands ─────────────────────────────
    #[regex(r"%[a-z0-9]+", |lex| lex.slice().to_string())]
    Reg(String),

    #[regex(r"[a-z_][a-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // validated later by `numeral::parse`
    #[token("$", |lex| lex.slice().to_string())]
    #[regex(r"\$?-?[0-9][0-9a-z]*", |lex| lex.slice().to_string())]
    Number(String),

    /// Dotted word that is not a known directive, e.g. `.position`.
    #[regex(r"\.[a-z_][a-z0-9_]*")]
    Dotted,

    #[token(",")] Comma,
    #[token(":")] Colon,
    #[token("(")] LParen,
    #[token(")")] RParen,
}

impl Token {
    pub fn is_directive(&self) -> bool {
        use Token::*;
        matches!(self, Pos | Align | Long | Quad)
    }

    pub fn is_mnemonic(&self) -> bool {
        use Token::*;
        matches!(
            self,
            Halt | Nop | Ret
                | Rrmovl | Cmovle | Cmovl | Cmove | Cmovne | Cmovge | Cmovg
                | Addl | Subl | Andl | Xorl
                | Irmovl | Rmmovl | Mrmovl
                | Jmp | Jle | Jl | Je | Jne | Jge | Jg | Call
                | Pushl | Popl
        )
    }

    /// Anything spelled like an identifier, reserved words included.
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Ident(_)) || self.is_mnemonic()
    }
}
