use std::{cell::RefCell, rc::Rc, str::from_utf8};

use passbook::{
    account::Account,
    bin_utils::{ScriptError, Service, csv_printer::print_statement},
};
use rust_decimal::Decimal;

const TEST_FILE: &str = include_str!("operations.csv");

#[test]
fn run_operation_script() {
    let mut output = Vec::new();
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&errors);
    let service = Service {
        input: TEST_FILE.as_bytes(),
        output: &mut output,
        error_printer: Box::new(move |line, err| {
            match err {
                ScriptError::AccountErr(_) => {
                    // business rejections are not technical errors, so we don't need to print them
                }
                err => sink.borrow_mut().push(format!("line {line}: {err}")),
            }
        }),
    };
    service.run().unwrap();

    // accounts are kept in a BTreeMap, so the summary order is stable
    assert_eq!(
        from_utf8(&output).unwrap(),
        "account,balance,frozen\n\
         alice,85,false\n\
         bob,105,false\n\
         carol,20,true\n"
    );

    let errors = errors.borrow();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("Unknown account `dave`"));
    assert!(errors[1].contains("Amount is required for Deposit"));
}

#[test]
fn statement_lists_full_audit_trail() {
    let alice = Account::new("alice");
    let bob = Account::new("bob");
    alice.deposit(Decimal::from(200)).unwrap();
    alice.withdraw(Decimal::from(75)).unwrap();
    alice.transfer(&bob, Decimal::from(25)).unwrap();

    let mut output = Vec::new();
    print_statement(&mut output, &alice).unwrap();
    assert_eq!(
        from_utf8(&output).unwrap(),
        "account,kind,amount,balance_after,note\n\
         alice,deposit,200,200,Deposit successful\n\
         alice,withdraw,75,125,Withdrawal successful\n\
         alice,transfer_out,25,100,Transferred to bob\n"
    );

    let mut output = Vec::new();
    print_statement(&mut output, &bob).unwrap();
    assert_eq!(
        from_utf8(&output).unwrap(),
        "account,kind,amount,balance_after,note\n\
         bob,transfer_in,25,25,Received from alice\n"
    );
}
