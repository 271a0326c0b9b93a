use crate::{
    emit::{Field, Lit},
    error::AsmError,
    lexer::Token,
    numeral,
    parser::{Inst, Operand, Value},
};

const REGISTERS: [(&str, u8); 8] = [
    ("%eax", 0),
    ("%ecx", 1),
    ("%edx", 2),
    ("%ebx", 3),
    ("%esp", 4),
    ("%ebp", 5),
    ("%esi", 6),
    ("%edi", 7),
];

/// Filler nibble for an unused register slot.
const NO_REG: u8 = 0xF;

pub fn reg_code(name: &str) -> Result<u8, AsmError> {
    REGISTERS
        .iter()
        .find(|(r, _)| r.eq_ignore_ascii_case(name))
        .map(|&(_, code)| code)
        .ok_or_else(|| AsmError::UnknownRegister(name.to_string()))
}

// instruction families (high opcode nibble)
const I_HALT:   u8 = 0x0;
const I_NOP:    u8 = 0x1;
const I_RRMOVL: u8 = 0x2;
const I_IRMOVL: u8 = 0x3;
const I_RMMOVL: u8 = 0x4;
const I_MRMOVL: u8 = 0x5;
const I_OPL:    u8 = 0x6;
const I_JXX:    u8 = 0x7;
const I_CALL:   u8 = 0x8;
const I_RET:    u8 = 0x9;
const I_PUSHL:  u8 = 0xA;
const I_POPL:   u8 = 0xB;

fn opcode(icode: u8, ifun: u8) -> Field {
    Field::Lit(Lit::byte((icode << 4) | ifun))
}

/// A 4-byte field: literal now, label later.
fn value_field(v: &Value) -> Result<Field, AsmError> {
    match v {
        Value::Num(tok) => Ok(Field::Lit(Lit::word(numeral::to_u32(numeral::parse(tok)?)?))),
        Value::Label(name) => Ok(Field::Sym(name.clone())),
    }
}

fn enc_op(icode: u8, ifun: u8) -> Vec<Field> {
    vec![opcode(icode, ifun)]
}

fn enc_rr(icode: u8, ifun: u8, ra: &str, rb: &str) -> Result<Vec<Field>, AsmError> {
    Ok(vec![
        opcode(icode, ifun),
        Field::Lit(Lit::nibble(reg_code(ra)?)),
        Field::Lit(Lit::nibble(reg_code(rb)?)),
    ])
}

fn enc_ir(v: &Value, rb: &str) -> Result<Vec<Field>, AsmError> {
    Ok(vec![
        opcode(I_IRMOVL, 0),
        Field::Lit(Lit::nibble(NO_REG)),
        Field::Lit(Lit::nibble(reg_code(rb)?)),
        value_field(v)?,
    ])
}

fn enc_mem(icode: u8, ra: &str, disp: &Value, rb: &str) -> Result<Vec<Field>, AsmError> {
    Ok(vec![
        opcode(icode, 0),
        Field::Lit(Lit::nibble(reg_code(ra)?)),
        Field::Lit(Lit::nibble(reg_code(rb)?)),
        value_field(disp)?,
    ])
}

fn enc_dest(icode: u8, ifun: u8, target: &Value) -> Result<Vec<Field>, AsmError> {
    Ok(vec![opcode(icode, ifun), value_field(target)?])
}

fn enc_stack(icode: u8, ra: &str) -> Result<Vec<Field>, AsmError> {
    Ok(vec![
        opcode(icode, 0),
        Field::Lit(Lit::nibble(reg_code(ra)?)),
        Field::Lit(Lit::nibble(NO_REG)),
    ])
}

/// Encode one instruction. Numeric operands are rendered immediately in
/// big-endian order; label operands stay pending until the second pass.
pub fn encode(inst: &Inst) -> Result<Vec<Field>, AsmError> {
    use Operand::*;
    use Token::*;
    match (&inst.op, inst.args.as_slice()) {
        (Halt, []) => Ok(enc_op(I_HALT, 0)),
        (Nop,  []) => Ok(enc_op(I_NOP, 0)),
        (Ret,  []) => Ok(enc_op(I_RET, 0)),

        (Rrmovl, [Register(a), Register(b)]) => enc_rr(I_RRMOVL, 0, a, b),
        (Cmovle, [Register(a), Register(b)]) => enc_rr(I_RRMOVL, 1, a, b),
        (Cmovl,  [Register(a), Register(b)]) => enc_rr(I_RRMOVL, 2, a, b),
        (Cmove,  [Register(a), Register(b)]) => enc_rr(I_RRMOVL, 3, a, b),
        (Cmovne, [Register(a), Register(b)]) => enc_rr(I_RRMOVL, 4, a, b),
        (Cmovge, [Register(a), Register(b)]) => enc_rr(I_RRMOVL, 5, a, b),
        (Cmovg,  [Register(a), Register(b)]) => enc_rr(I_RRMOVL, 6, a, b),

        (Addl, [Register(a), Register(b)]) => enc_rr(I_OPL, 0, a, b),
        (Subl, [Register(a), Register(b)]) => enc_rr(I_OPL, 1, a, b),
        (Andl, [Register(a), Register(b)]) => enc_rr(I_OPL, 2, a, b),
        (Xorl, [Register(a), Register(b)]) => enc_rr(I_OPL, 3, a, b),

        (Irmovl, [Imm(v), Register(b)])   => enc_ir(v, b),
        (Rmmovl, [Register(a), Mem(d, b)]) => enc_mem(I_RMMOVL, a, d, b),
        (Mrmovl, [Mem(d, b), Register(a)]) => enc_mem(I_MRMOVL, a, d, b),

        (Jmp,  [Imm(t)]) => enc_dest(I_JXX, 0, t),
        (Jle,  [Imm(t)]) => enc_dest(I_JXX, 1, t),
        (Jl,   [Imm(t)]) => enc_dest(I_JXX, 2, t),
        (Je,   [Imm(t)]) => enc_dest(I_JXX, 3, t),
        (Jne,  [Imm(t)]) => enc_dest(I_JXX, 4, t),
        (Jge,  [Imm(t)]) => enc_dest(I_JXX, 5, t),
        (Jg,   [Imm(t)]) => enc_dest(I_JXX, 6, t),
        (Call, [Imm(t)]) => enc_dest(I_CALL, 0, t),

        (Pushl, [Register(a)]) => enc_stack(I_PUSHL, a),
        (Popl,  [Register(a)]) => enc_stack(I_POPL, a),

        _ => Err(AsmError::BadOperands(inst.name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{emit::Record, parser::{classify, Body}};

    fn enc(src: &str) -> Result<String, AsmError> {
        let Body::Inst(inst) = classify(src)?.body else {
            panic!("not an instruction: {src}");
        };
        let fields = encode(&inst)?;
        Ok(Record { line: 1, addr: 0, fields }.to_string())
    }

    #[test]
    fn register_table() {
        assert_eq!(reg_code("%eax").unwrap(), 0);
        assert_eq!(reg_code("%edi").unwrap(), 7);
        assert_eq!(reg_code("%rax"), Err(AsmError::UnknownRegister("%rax".into())));
    }

    #[test]
    fn no_operand() {
        assert_eq!(enc("halt").unwrap(), "00");
        assert_eq!(enc("nop").unwrap(), "10");
        assert_eq!(enc("ret").unwrap(), "90");
    }

    #[test]
    fn reg_reg() {
        assert_eq!(enc("rrmovl %esp, %ebp").unwrap(), "2045");
        assert_eq!(enc("cmovg %eax, %edx").unwrap(), "2602");
        assert_eq!(enc("addl %eax, %ebx").unwrap(), "6003");
        assert_eq!(enc("xorl %esi, %edi").unwrap(), "6367");
    }

    #[test]
    fn immediate() {
        assert_eq!(enc("irmovl $5, %eax").unwrap(), "30F000000005");
        assert_eq!(enc("irmovl $-1, %ecx").unwrap(), "30F1FFFFFFFF");
        assert_eq!(enc("irmovl stack, %esp").unwrap(), "30F4#stack#");
    }

    #[test]
    fn memory() {
        assert_eq!(enc("rmmovl %ecx, 0x10(%ebp)").unwrap(), "401500000010");
        assert_eq!(enc("mrmovl (%esp), %eax").unwrap(), "500400000000");
        assert_eq!(enc("mrmovl list(%edx), %esi").unwrap(), "5062#list#");
    }

    #[test]
    fn branches() {
        assert_eq!(enc("jne 0x40").unwrap(), "7400000040");
        assert_eq!(enc("call main").unwrap(), "80#main#");
    }

    #[test]
    fn stack() {
        assert_eq!(enc("pushl %ebp").unwrap(), "A05F");
        assert_eq!(enc("popl %eax").unwrap(), "B00F");
    }

    #[test]
    fn errors() {
        assert_eq!(enc("addl %eax, %rbx"), Err(AsmError::UnknownRegister("%rbx".into())));
        assert_eq!(enc("addl %eax"), Err(AsmError::BadOperands("addl".into())));
        assert_eq!(enc("irmovl $1z, %eax"), Err(AsmError::MalformedNumeral("$1z".into())));
    }
}
